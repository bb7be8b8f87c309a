//! Domain Errors
//!
//! `Validation` and `NotFound` are produced by the list and swallowed by the
//! store; `Persistence` always reaches the caller.

use thiserror::Error;

/// Common result type for list operations
pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

impl TodoError {
    /// True for the conditions the popup treats as silent no-ops
    pub fn is_ignorable(&self) -> bool {
        matches!(self, TodoError::Validation(_) | TodoError::NotFound(_))
    }
}

/// Failures reported by a storage adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },
    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}
