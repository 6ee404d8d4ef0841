//! Core error types for schedwise-core.
//!
//! Scheduling never fails because a task cannot be placed; that outcome is
//! reported as data. The errors here cover malformed input, configuration
//! and the task file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for schedwise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input violated a data-model invariant
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lookup by id found nothing
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Invariant violations detected before any scheduling work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task '{task_id}': time_required must not be negative (got {minutes})")]
    NegativeDuration { task_id: String, minutes: i32 },

    #[error("task '{task_id}': time_required must be greater than zero")]
    NonPositiveDuration { task_id: String },

    #[error("task '{task_id}': estimated_energy_cost must not be negative (got {cost})")]
    NegativeEnergyCost { task_id: String, cost: i32 },

    #[error("task id must not be empty")]
    EmptyTaskId,

    #[error("task id '{0}' appears more than once")]
    DuplicateTaskId(String),

    /// A task flagged as scheduled lacks a date, start or end.
    #[error("task '{task_id}' is scheduled but has no {field}")]
    MissingSchedule { task_id: String, field: &'static str },

    #[error("task '{task_id}': start {start} must be before end {end}")]
    InvertedInterval {
        task_id: String,
        start: String,
        end: String,
    },

    #[error("energy curve must have exactly 24 entries (got {0})")]
    CurveLength(usize),

    #[error("energy curve value at hour {hour} is out of range 0-100 (got {value})")]
    CurveValueOutOfRange { hour: usize, value: i32 },

    #[error("invalid hour window: need 0 <= start_hour ({start}) < end_hour ({end}) <= 24")]
    InvalidHourWindow { start: u32, end: u32 },

    #[error("invalid scheduling policy field '{field}': {message}")]
    InvalidPolicy { field: &'static str, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Home directory could not be determined")]
    NoHomeDir,
}

/// Malformed `HH:MM` time-of-day string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time of day '{input}': {reason}")]
pub struct TimeParseError {
    pub input: String,
    pub reason: &'static str,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
