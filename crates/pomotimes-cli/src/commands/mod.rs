pub mod config;
pub mod report;
pub mod settings;
pub mod task;
pub mod timer;

use pomotimes_core::{
    BellNotifier, Config, Database, KeyValueStore, LogNotifier, MemoryStore, Notifier,
    NullNotifier, PomodoroApp,
};

/// The SQLite store, or an in-memory one if it cannot be opened.
pub fn open_store() -> Box<dyn KeyValueStore> {
    match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!("{e}; continuing without persistence");
            Box::new(MemoryStore::new())
        }
    }
}

pub fn notifier(config: &Config) -> Box<dyn Notifier> {
    match (config.notifications.enabled, config.notifications.bell) {
        (false, _) => Box::new(NullNotifier),
        (true, true) => Box::new(BellNotifier),
        (true, false) => Box::new(LogNotifier),
    }
}

/// App for one-shot commands that never complete an interval.
pub fn load_app() -> PomodoroApp {
    PomodoroApp::load(open_store(), Box::new(NullNotifier))
}
