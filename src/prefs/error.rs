//! Preference error types.

use thiserror::Error;

/// Errors that can occur while reading, snapshotting or persisting preferences
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PreferenceError {
    /// A stored value is not one the preference accepts
    #[error("Invalid value '{value}' for preference '{key}' (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Reading or writing a preference file failed
    #[error("Preference file I/O failed: {0}")]
    Io(String),
}
