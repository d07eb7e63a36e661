//! Error types for the remote synchronization client.

use std::time::Duration;
use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur against the remote document store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The bounded timeout elapsed before the remote call resolved.
    #[error("remote operation timed out after {0:?}")]
    Timeout(Duration),

    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The remote store rejected the request.
    #[error("backend error: {0}")]
    Backend(String),
}

impl RemoteError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { retryable, .. } => *retryable,
            Self::Timeout(_) => true,
            Self::Backend(_) => false,
        }
    }
}
