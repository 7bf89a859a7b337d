//! Append-only log of completed focus sessions.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One completed focus interval. Persisted as `{ "timestamp": <epoch ms> }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "timestamp")]
    pub completed_at_ms: i64,
}

impl Session {
    pub fn completed_at(at: DateTime<Utc>) -> Self {
        Self {
            completed_at_ms: at.timestamp_millis(),
        }
    }

    /// Completion time in `tz`. `None` only for timestamps chrono cannot
    /// represent.
    pub fn completed_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(self.completed_at_ms).single()
    }
}

/// Ordered sequence of sessions. Entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    sessions: Vec<Session>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Append a session completed at `at` and return it.
    pub fn record(&mut self, at: DateTime<Utc>) -> Session {
        let session = Session::completed_at(at);
        self.append(session);
        session
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl From<Vec<Session>> for SessionLog {
    fn from(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }
}
