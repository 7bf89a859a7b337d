//! # pomotimes Core Library
//!
//! Business logic for the pomotimes Pomodoro timer: a repeating cycle of
//! focus and break intervals, task tracking, and reports over completed
//! focus sessions. The `pomotimes` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a one-second-granularity state machine; the caller
//!   invokes `tick()` once per elapsed second while it is running
//! - **Tick scheduling**: at most one outstanding tick, invalidated on pause,
//!   mode change and settings change; [`driver::run`] drives it on tokio
//! - **Session Log**: append-only completion timestamps of focus intervals
//! - **Reports**: hourly, weekly and daily aggregates over the session log
//! - **Storage**: best-effort key-value persistence (SQLite or in-memory)
//!   and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`PomodoroApp`]: Engine wired to session log, tasks, notifier and store
//! - [`Settings`]: Validated interval durations
//! - [`Database`]: SQLite-backed key-value store
//! - [`Config`]: Application configuration

pub mod app;
pub mod driver;
pub mod error;
pub mod events;
pub mod notify;
pub mod reports;
pub mod session;
pub mod settings;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use app::{Clock, PomodoroApp, SystemClock};
pub use driver::Command;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Event, NotifyKind};
pub use notify::{BellNotifier, LogNotifier, Notifier, NullNotifier};
pub use reports::{DailySummary, DayBucket, HourBucket};
pub use session::{Session, SessionLog};
pub use settings::Settings;
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use tasks::{Task, TaskList};
pub use timer::{Mode, TimerEngine, TimerState};
