//! Interval durations and the long-break cadence.
//!
//! A [`Settings`] value is always valid: every field is a strictly positive
//! integer. Construction goes through [`Settings::new`] and deserialization
//! through the same check, so the timer engine never observes a zero interval.
//!
//! The persisted JSON layout is
//! `{ "pomodoro": 25, "shortBreak": 5, "longBreak": 15, "longBreakInterval": 4 }`.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::Mode;

const DEFAULT_POMODORO_MIN: u32 = 25;
const DEFAULT_SHORT_BREAK_MIN: u32 = 5;
const DEFAULT_LONG_BREAK_MIN: u32 = 15;
const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SettingsRecord", into = "SettingsRecord")]
pub struct Settings {
    pomodoro: u32,
    short_break: u32,
    long_break: u32,
    long_break_interval: u32,
}

/// Wire shape of [`Settings`]. Signed so that negative input reports as an
/// invalid value rather than a type mismatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRecord {
    pomodoro: i64,
    short_break: i64,
    long_break: i64,
    long_break_interval: i64,
}

impl Settings {
    /// Validate and build settings. Durations are in minutes.
    pub fn new(
        pomodoro: i64,
        short_break: i64,
        long_break: i64,
        long_break_interval: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            pomodoro: positive("pomodoro", pomodoro)?,
            short_break: positive("shortBreak", short_break)?,
            long_break: positive("longBreak", long_break)?,
            long_break_interval: positive("longBreakInterval", long_break_interval)?,
        })
    }

    pub fn pomodoro_minutes(&self) -> u32 {
        self.pomodoro
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break
    }

    pub fn long_break_minutes(&self) -> u32 {
        self.long_break
    }

    /// Number of focus completions between long breaks.
    pub fn long_break_interval(&self) -> u32 {
        self.long_break_interval
    }

    /// Full duration of `mode` in seconds.
    pub fn duration_for(&self, mode: Mode) -> u64 {
        let minutes = match mode {
            Mode::Focus => self.pomodoro,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        };
        u64::from(minutes) * 60
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro: DEFAULT_POMODORO_MIN,
            short_break: DEFAULT_SHORT_BREAK_MIN,
            long_break: DEFAULT_LONG_BREAK_MIN,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
        }
    }
}

impl TryFrom<SettingsRecord> for Settings {
    type Error = ValidationError;

    fn try_from(r: SettingsRecord) -> Result<Self, Self::Error> {
        Settings::new(r.pomodoro, r.short_break, r.long_break, r.long_break_interval)
    }
}

impl From<Settings> for SettingsRecord {
    fn from(s: Settings) -> Self {
        Self {
            pomodoro: s.pomodoro.into(),
            short_break: s.short_break.into(),
            long_break: s.long_break.into(),
            long_break_interval: s.long_break_interval.into(),
        }
    }
}

fn positive(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ValidationError::InvalidSettingsValue { field, value }),
    }
}
