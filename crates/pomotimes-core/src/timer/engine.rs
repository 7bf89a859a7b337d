//! Timer engine implementation.
//!
//! The engine is a one-second-granularity state machine. It owns no clock
//! and no thread: the caller invokes `tick()` once per elapsed second while
//! the timer is running (see [`super::TickSchedule`]).
//!
//! ## Mode Transitions
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> Focus -> LongBreak -> Focus
//! ```
//!
//! Every `longBreakInterval`-th focus completion leads to a long break. The
//! focus counter is never reset; the cycle boundary is `count % interval == 0`.
//! Changing the interval mid-cycle therefore shifts the phase of the cycle.
//!
//! Every transition pauses the timer.
//!
//! ## Usage
//!
//! ```
//! use pomotimes_core::{Settings, TimerEngine};
//!
//! let mut engine = TimerEngine::new(Settings::default());
//! engine.start_or_pause();
//! // Once per second while running:
//! let _event = engine.tick(); // Some(Event) when the interval finishes
//! ```

use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::events::Event;
use crate::settings::Settings;

/// Snapshot of the engine's countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub seconds_remaining: u64,
    pub is_running: bool,
    pub completed_focus_count: u32,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    settings: Settings,
    mode: Mode,
    seconds_remaining: u64,
    is_running: bool,
    completed_focus_count: u32,
}

impl TimerEngine {
    /// Create an engine paused at the start of a focus interval.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mode: Mode::Focus,
            seconds_remaining: settings.duration_for(Mode::Focus),
            is_running: false,
            completed_focus_count: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_focus_count(&self) -> u32 {
        self.completed_focus_count
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Full duration of the current mode in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.settings.duration_for(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.seconds_remaining as f64 / total as f64)
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            is_running: self.is_running,
            completed_focus_count: self.completed_focus_count,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Toggle between running and paused. The countdown itself is untouched.
    pub fn start_or_pause(&mut self) -> Event {
        self.is_running = !self.is_running;
        if self.is_running {
            Event::TimerStarted {
                mode: self.mode,
                seconds_remaining: self.seconds_remaining,
            }
        } else {
            Event::TimerPaused {
                mode: self.mode,
                seconds_remaining: self.seconds_remaining,
            }
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while paused. Returns the completion event when the
    /// countdown reaches zero, in which case the engine has already moved to
    /// the next mode.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        if self.seconds_remaining == 0 {
            return Some(self.advance());
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            return Some(self.advance());
        }
        None
    }

    /// End the current interval now, with the same effect as running out.
    pub fn skip(&mut self) -> Event {
        self.advance()
    }

    /// Pause and restore the full duration of the current mode.
    pub fn reset(&mut self) -> Event {
        self.is_running = false;
        self.seconds_remaining = self.total_seconds();
        Event::TimerReset {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
        }
    }

    /// Replace the settings.
    ///
    /// If the current mode's duration changed, the countdown restarts from the
    /// new duration and the timer pauses; partial progress is discarded.
    /// Returns whether that reset happened.
    pub fn apply_settings(&mut self, settings: Settings) -> bool {
        let before = self.total_seconds();
        self.settings = settings;
        if self.total_seconds() == before {
            return false;
        }
        self.seconds_remaining = self.total_seconds();
        self.is_running = false;
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let (next, event) = match self.mode {
            Mode::Focus => {
                self.completed_focus_count = self.completed_focus_count.saturating_add(1);
                let next = if self.completed_focus_count % self.settings.long_break_interval() == 0
                {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                };
                (
                    next,
                    Event::FocusCompleted {
                        completed_focus_count: self.completed_focus_count,
                        next_mode: next,
                    },
                )
            }
            completed @ (Mode::ShortBreak | Mode::LongBreak) => (
                Mode::Focus,
                Event::BreakCompleted {
                    completed_mode: completed,
                },
            ),
        };
        tracing::debug!(from = ?self.mode, to = ?next, count = self.completed_focus_count, "mode transition");
        self.mode = next;
        self.seconds_remaining = self.settings.duration_for(next);
        self.is_running = false;
        event
    }
}

/// Format seconds as `MM:SS`. Minutes are not capped at 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
