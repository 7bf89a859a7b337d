//! Application state: the timer engine wired to its collaborators.
//!
//! [`PomodoroApp`] owns the engine, the session log, the task list and the
//! current task selection. Each user action and tick goes through it; the
//! completion events the engine returns are dispatched here to the session
//! log, the task tracker and the notifier. Every mutation of a persisted
//! record re-reads it from the store first and writes it back immediately,
//! so one-shot commands running alongside an interactive session are not
//! overwritten.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::events::Event;
use crate::notify::Notifier;
use crate::session::{Session, SessionLog};
use crate::settings::Settings;
use crate::storage::{
    load_record, reload_record, save_record, KeyValueStore, SESSIONS_KEY, SETTINGS_KEY, TASKS_KEY,
};
use crate::tasks::{Task, TaskList};
use crate::timer::TimerEngine;

/// Source of completion timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct PomodoroApp {
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    engine: TimerEngine,
    sessions: SessionLog,
    tasks: TaskList,
    selected_task: Option<String>,
}

impl PomodoroApp {
    /// Load persisted settings, tasks and sessions from `store`.
    ///
    /// Missing or malformed records fall back to defaults.
    pub fn load(store: Box<dyn KeyValueStore>, notifier: Box<dyn Notifier>) -> Self {
        let settings: Settings = load_record(&*store, SETTINGS_KEY);
        let tasks: TaskList = load_record(&*store, TASKS_KEY);
        let sessions: SessionLog = load_record(&*store, SESSIONS_KEY);
        tracing::debug!(
            tasks = tasks.len(),
            sessions = sessions.len(),
            "loaded persisted state"
        );
        Self {
            store,
            notifier,
            clock: Box::new(SystemClock),
            engine: TimerEngine::new(settings),
            sessions,
            tasks,
            selected_task: None,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    pub fn sessions(&self) -> &[Session] {
        self.sessions.sessions()
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn selected_task_id(&self) -> Option<&str> {
        self.selected_task.as_deref()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_task.as_deref()?)
    }

    // ── Timer actions ────────────────────────────────────────────────

    pub fn start_or_pause(&mut self) -> Event {
        self.engine.start_or_pause()
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick()?;
        self.dispatch(&event);
        Some(event)
    }

    pub fn skip(&mut self) -> Event {
        let event = self.engine.skip();
        self.dispatch(&event);
        event
    }

    pub fn reset(&mut self) -> Event {
        self.engine.reset()
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Persist `settings` and hand them to the engine.
    ///
    /// Returns whether the running countdown was reset.
    pub fn save_settings(&mut self, settings: Settings) -> bool {
        save_record(&*self.store, SETTINGS_KEY, &settings);
        self.engine.apply_settings(settings)
    }

    /// Validate raw minute values, then save them.
    pub fn update_settings(
        &mut self,
        pomodoro: i64,
        short_break: i64,
        long_break: i64,
        long_break_interval: i64,
    ) -> Result<bool, ValidationError> {
        let settings = Settings::new(pomodoro, short_break, long_break, long_break_interval)?;
        Ok(self.save_settings(settings))
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn add_task(&mut self, text: &str, estimate: u32) -> Result<Task, ValidationError> {
        self.refresh_tasks();
        let task = self.tasks.add(text, estimate)?.clone();
        self.persist_tasks();
        Ok(task)
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        self.refresh_tasks();
        let completed = self.tasks.toggle(id)?;
        self.persist_tasks();
        Some(completed)
    }

    /// Remove a task. A selection pointing at it is left in place.
    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        self.refresh_tasks();
        let task = self.tasks.delete(id)?;
        self.persist_tasks();
        Some(task)
    }

    /// Select the task that focus completions are credited to.
    ///
    /// Returns false, leaving the selection unchanged, if `id` is unknown.
    pub fn select_task(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selected_task = None;
                true
            }
            Some(id) if self.refresh_tasks().get(id).is_some() => {
                self.selected_task = Some(id.to_string());
                true
            }
            Some(_) => false,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn dispatch(&mut self, event: &Event) {
        if let Event::FocusCompleted {
            completed_focus_count,
            ..
        } = event
        {
            if let Some(sessions) = reload_record(&*self.store, SESSIONS_KEY) {
                self.sessions = sessions;
            }
            let session = self.sessions.record(self.clock.now());
            save_record(&*self.store, SESSIONS_KEY, &self.sessions);
            self.refresh_tasks();
            if let Some(task) = self.tasks.on_focus_completed(self.selected_task.as_deref()) {
                tracing::debug!(task = %task.id, pomodoros = task.pomodoros_completed, "credited task");
                self.persist_tasks();
            }
            tracing::info!(
                count = completed_focus_count,
                at = session.completed_at_ms,
                "focus session recorded"
            );
        }
        if let Some(kind) = event.notify_kind() {
            self.notifier.notify(kind);
        }
    }

    /// Pick up tasks written by other processes since the last read.
    fn refresh_tasks(&mut self) -> &TaskList {
        if let Some(tasks) = reload_record(&*self.store, TASKS_KEY) {
            self.tasks = tasks;
        }
        &self.tasks
    }

    fn persist_tasks(&self) {
        save_record(&*self.store, TASKS_KEY, &self.tasks);
    }
}
