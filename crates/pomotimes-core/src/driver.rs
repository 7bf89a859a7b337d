//! Async tick loop for an interactive session.
//!
//! A single task owns the [`PomodoroApp`] and selects between the one pending
//! tick and the next user [`Command`]. Nothing else touches the app while the
//! loop runs, so no locking is involved.

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::app::PomodoroApp;
use crate::events::Event;
use crate::settings::Settings;
use crate::timer::{Mode, TickSchedule};

/// User actions accepted by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartPause,
    Skip,
    Reset,
    SelectTask(Option<String>),
    ApplySettings(Settings),
    Quit,
}

/// Drive `app` until `Quit` arrives or the command channel closes.
///
/// `on_update` runs after every accepted tick and command, with the event the
/// engine produced, if any.
pub async fn run<F>(app: &mut PomodoroApp, mut commands: mpsc::Receiver<Command>, mut on_update: F)
where
    F: FnMut(&PomodoroApp, Option<&Event>),
{
    let mut schedule = TickSchedule::new();

    loop {
        let pending = schedule.pending();
        let next_tick = async {
            match pending {
                Some(tick) => tokio::time::sleep_until(tick.due).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            cmd = commands.recv() => {
                let Some(cmd) = cmd else { break };
                let before = Epoch::of(app);
                let event = match cmd {
                    Command::Quit => break,
                    Command::StartPause => Some(app.start_or_pause()),
                    Command::Skip => Some(app.skip()),
                    Command::Reset => Some(app.reset()),
                    Command::SelectTask(id) => {
                        if !app.select_task(id.as_deref()) {
                            tracing::warn!(id = ?id, "no such task, selection unchanged");
                        }
                        None
                    }
                    Command::ApplySettings(settings) => {
                        app.save_settings(settings);
                        None
                    }
                };
                sync_schedule(&mut schedule, app, before);
                on_update(app, event.as_ref());
            }
            () = next_tick => {
                let Some(tick) = pending else { continue };
                if !schedule.fire(tick) {
                    continue;
                }
                let event = app.tick();
                if app.engine().is_running() {
                    schedule.rearm_after(tick);
                } else {
                    schedule.cancel();
                }
                on_update(app, event.as_ref());
            }
        }
    }
    tracing::debug!("timer loop stopped");
}

/// What a pending tick was scheduled against.
#[derive(PartialEq)]
struct Epoch {
    mode: Mode,
    settings: Settings,
}

impl Epoch {
    fn of(app: &PomodoroApp) -> Self {
        Self {
            mode: app.engine().mode(),
            settings: *app.settings(),
        }
    }
}

fn sync_schedule(schedule: &mut TickSchedule, app: &PomodoroApp, before: Epoch) {
    if !app.engine().is_running() || Epoch::of(app) != before {
        if schedule.pending().is_some() {
            tracing::debug!(generation = schedule.generation(), "tick cancelled");
        }
        schedule.cancel();
    }
    if app.engine().is_running() && schedule.pending().is_none() {
        schedule.arm(Instant::now());
    }
}
