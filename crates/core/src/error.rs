//! Core Error Types
//!
//! Error types shared by the PromptSmith workspace crates. Kept dependency-free
//! (thiserror + serde_json only) so the domain crate stays lightweight.
//!
//! The application crate wraps these in `AppError` alongside storage and
//! generation failures.

use thiserror::Error;

/// Core error type for the PromptSmith domain model.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A category label or slug that does not name a known category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an unknown category error
    pub fn unknown_category(value: impl Into<String>) -> Self {
        Self::UnknownCategory(value.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
