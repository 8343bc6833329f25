//! Custom error types for activity-log
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::audit::EventKind;

/// The main error type for activity-log operations
#[derive(Error, Debug)]
pub enum ActivityError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML logger definition errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Two fields with the same name registered on one logger
    #[error("Field '{name}' is already registered on logger '{logger}'")]
    DuplicateField { logger: String, name: String },

    /// A field declaration that cannot be built
    #[error("Invalid field '{name}': {reason}")]
    InvalidField { name: String, reason: String },

    /// The record type cannot raise this lifecycle event
    #[error("Record type '{subject_type}' does not support the '{event}' event")]
    UnsupportedEvent {
        subject_type: String,
        event: EventKind,
    },

    /// A field resolution strategy failed during reduction
    #[error("Failed to resolve field '{field}': {reason}")]
    Resolver { field: String, reason: String },

    /// No logger is bound to the subject type
    #[error("No logger bound to record type '{0}'")]
    NotBound(String),

    /// Activity log storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ActivityError {
    /// Create an "invalid field" error
    pub fn invalid_field(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a resolver error for a field
    pub fn resolver(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolver {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a configuration-time error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Yaml(_) | Self::DuplicateField { .. } | Self::InvalidField { .. }
        )
    }

    /// Check if this is a resolver error
    pub fn is_resolver(&self) -> bool {
        matches!(self, Self::Resolver { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ActivityError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ActivityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ActivityError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for activity-log operations
pub type ActivityResult<T> = Result<T, ActivityError>;
