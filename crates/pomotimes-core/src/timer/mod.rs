mod engine;
mod mode;
mod ticker;

pub use engine::{format_clock, TimerEngine, TimerState};
pub use mode::Mode;
pub use ticker::{PendingTick, TickSchedule, TICK_INTERVAL};
