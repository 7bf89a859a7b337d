//! Persistence behind a minimal key-value contract.
//!
//! Three independent records are kept: `settings`, `tasks` and `sessions`,
//! each serialized as JSON. Reads and writes are best-effort: a missing,
//! unreadable or malformed record yields the default, and a failed write is
//! logged and otherwise ignored.

mod config;
pub mod database;
mod memory;

pub use config::{Config, LoggingConfig, NotificationsConfig, ReportsConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub const SETTINGS_KEY: &str = "settings";
pub const TASKS_KEY: &str = "tasks";
pub const SESSIONS_KEY: &str = "sessions";

/// Byte-oriented key-value store.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Load a JSON record, falling back to `T::default()` when it is absent,
/// unreadable or malformed.
pub fn load_record<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.load(key) {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(key, "malformed record, using defaults: {e}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, "read failed, using defaults: {e}");
            T::default()
        }
    }
}

/// Re-read a record that another process may have written.
///
/// `None` when the read fails or the record is malformed; the caller keeps
/// its in-memory copy. An absent record reads as `T::default()`.
pub fn reload_record<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.load(key) {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes)
            .map_err(|e| tracing::warn!(key, "malformed record, keeping loaded copy: {e}"))
            .ok(),
        Ok(None) => Some(T::default()),
        Err(e) => {
            tracing::warn!(key, "read failed, keeping loaded copy: {e}");
            None
        }
    }
}

/// Write a JSON record. Returns whether the write succeeded.
pub fn save_record<T, S>(store: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let bytes = match serde_json::to_vec(value) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(key, "failed to serialize record: {e}");
            return false;
        }
    };
    match store.save(key, &bytes) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, "write failed, change kept in memory only: {e}");
            false
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// `POMOTIMES_DATA_DIR` wins if set. Otherwise `~/.config/pomotimes`, or
/// `~/.config/pomotimes-dev` when `POMOTIMES_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("POMOTIMES_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOTIMES_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomotimes-dev")
            } else {
                base_dir.join("pomotimes")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
