//! Persistence error types.

use tally_shared::AppError;
use thiserror::Error;

/// Errors reported by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The record to delete does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backend could not serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::Conflict(err.to_string()),
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Unavailable(_) => Self::Database(err.to_string()),
        }
    }
}
