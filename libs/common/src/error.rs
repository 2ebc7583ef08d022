//! Custom error types for the common library
//!
//! This module defines the transport and storage errors shared by every
//! service crate.

use thiserror::Error;

/// Error raised while talking to the HloPG backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HttpError {
    /// The request did not complete within the configured timeout
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Connection refused, DNS failure, TLS failure and friends
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status code
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// The backend answered `success: false`
    #[error("Backend rejected request: {0}")]
    Rejected(String),
}

impl HttpError {
    /// Whether an idempotent request may be sent again after this error
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::Timeout(_) | HttpError::Transport(_) => true,
            HttpError::Status { status, .. } => *status >= 500,
            HttpError::Decode(_) | HttpError::Rejected(_) => false,
        }
    }

    /// The user-facing message carried by the error, if the backend sent one
    pub fn message(&self) -> String {
        match self {
            HttpError::Status { message, .. } | HttpError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error raised by the persisted key/value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a JSON object
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with HttpError
pub type HttpResult<T> = Result<T, HttpError>;

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(HttpError::Timeout("/hostel/1".to_string()).is_retryable());
        assert!(HttpError::Transport("refused".to_string()).is_retryable());
        assert!(
            HttpError::Status {
                status: 503,
                message: "busy".to_string()
            }
            .is_retryable()
        );
        assert!(
            !HttpError::Status {
                status: 404,
                message: "missing".to_string()
            }
            .is_retryable()
        );
        assert!(!HttpError::Rejected("nope".to_string()).is_retryable());
    }

    #[test]
    fn test_message_prefers_backend_text() {
        let err = HttpError::Rejected("Hostel already liked".to_string());
        assert_eq!(err.message(), "Hostel already liked");
    }
}
