use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every timer state change produces an Event.
///
/// Events carry no wall-clock time: the engine is deterministic, and the app
/// layer stamps completions when it records them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        seconds_remaining: u64,
    },
    TimerPaused {
        mode: Mode,
        seconds_remaining: u64,
    },
    TimerReset {
        mode: Mode,
        seconds_remaining: u64,
    },
    /// A focus interval ran out or was skipped.
    FocusCompleted {
        /// Focus completions so far, including this one.
        completed_focus_count: u32,
        next_mode: Mode,
    },
    /// A short or long break ran out or was skipped.
    BreakCompleted {
        completed_mode: Mode,
    },
}

/// What the notifier is told about. Only interval boundaries are announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    FocusCompleted,
    BreakCompleted,
}

impl Event {
    pub fn notify_kind(&self) -> Option<NotifyKind> {
        match self {
            Event::FocusCompleted { .. } => Some(NotifyKind::FocusCompleted),
            Event::BreakCompleted { .. } => Some(NotifyKind::BreakCompleted),
            _ => None,
        }
    }

    /// True for events produced by a mode transition.
    pub fn is_transition(&self) -> bool {
        self.notify_kind().is_some()
    }
}
