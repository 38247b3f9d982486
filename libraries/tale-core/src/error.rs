/// Core error types for Tale Player
use thiserror::Error;

use crate::types::ProfileId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tale Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Two catalog entries share the same id
    #[error("Duplicate profile id: {0}")]
    DuplicateProfile(ProfileId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
