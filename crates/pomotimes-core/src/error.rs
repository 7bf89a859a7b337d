//! Core error types for pomotimes-core.
//!
//! None of these are fatal to a running timer: validation errors are raised at
//! the input boundary, storage and config errors degrade to in-memory defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomotimes-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No task with this id
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// Reading a key failed
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Writing a key failed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised at the user-input boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A duration or interval was not strictly positive
    #[error("Invalid settings value for '{field}': {value} (must be a positive integer)")]
    InvalidSettingsValue { field: &'static str, value: i64 },

    /// Task text was empty after trimming
    #[error("Task text must not be empty")]
    EmptyTaskText,

    /// Pomodoro estimate below one
    #[error("Invalid estimate {0}: a task needs at least one pomodoro")]
    InvalidEstimate(u32),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
