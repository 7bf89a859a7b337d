//! SQLite-backed key-value store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, KeyValueStore};
use crate::error::StorageError;

/// SQLite database holding the persisted records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/pomotimes.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::Open {
            path: "<data dir>".into(),
            message: e.to_string(),
        })?;
        Self::open_at(&dir.join("pomotimes.db"))
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let db = Self { conn };
        db.migrate().map_err(|e| StorageError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Open {
            path: ":memory:".into(),
            message: e.to_string(),
        })?;
        let db = Self { conn };
        db.migrate().map_err(|e| StorageError::Open {
            path: ":memory:".into(),
            message: e.to_string(),
        })?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value BLOB NOT NULL
            );",
        )
    }
}

impl KeyValueStore for Database {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}
