//! Error types for the local record store.

use std::io;
use thiserror::Error;

/// Result type for local store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in local store operations.
///
/// These only surface from the write path; the read path recovers from
/// corruption by treating the affected collection as empty.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize records for persistence.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage capacity is exhausted.
    #[error("storage quota exceeded: {message}")]
    QuotaExceeded {
        /// Description of the exhausted resource.
        message: String,
    },
}

impl StoreError {
    /// Creates a quota exceeded error.
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }
}
