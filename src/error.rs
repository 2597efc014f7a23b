//! Error types for herdbook.

use thiserror::Error;

/// Errors returned by herdbook operations.
#[derive(Debug, Error)]
pub enum HerdbookError {
    /// No record exists with the given id.
    #[error("Record {0} not found")]
    NotFound(i64),

    /// User input was rejected before reaching storage.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The database could not be opened, queried or written.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration or path resolution failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl HerdbookError {
    /// Whether this error should be shown as a warning rather than a failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }
}
