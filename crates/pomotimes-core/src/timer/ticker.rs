//! One-outstanding-tick scheduling for the timer engine.
//!
//! The schedule holds at most one pending tick. Each tick carries the
//! generation it was armed under; `cancel()` bumps the generation, so a tick
//! armed before a pause, mode change or settings change can never fire
//! against the new state.

use std::time::Duration;

use tokio::time::Instant;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    pub generation: u64,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct TickSchedule {
    generation: u64,
    pending: Option<PendingTick>,
}

impl TickSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule a tick one interval after `now` unless one is already pending.
    pub fn arm(&mut self, now: Instant) -> PendingTick {
        if let Some(p) = self.pending {
            return p;
        }
        let tick = PendingTick {
            generation: self.generation,
            due: now + TICK_INTERVAL,
        };
        self.pending = Some(tick);
        tick
    }

    /// Schedule the tick that follows `fired`, keeping a steady cadence.
    pub fn rearm_after(&mut self, fired: PendingTick) -> PendingTick {
        let tick = PendingTick {
            generation: self.generation,
            due: fired.due + TICK_INTERVAL,
        };
        self.pending = Some(tick);
        tick
    }

    /// Drop any pending tick and invalidate everything armed so far.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Consume `tick` if it is the current pending tick.
    pub fn fire(&mut self, tick: PendingTick) -> bool {
        if self.pending == Some(tick) && tick.generation == self.generation {
            self.pending = None;
            return true;
        }
        false
    }
}
