//! Custom error types for the authentication client

use common::{HttpError, StorageError};
use thiserror::Error;

/// Custom error type for authentication flows
#[derive(Error, Debug)]
pub enum AuthError {
    /// No session token; the caller should show the login prompt
    #[error("Login required")]
    LoginRequired,

    /// Neither the owner nor the user login accepted the credentials
    #[error("Invalid email / phone or password")]
    InvalidCredentials,

    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The backend answered without the fields the flow needs
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Backend error
    #[error("Backend error: {0}")]
    Http(#[from] HttpError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Whether the backend refused the request (as opposed to being unreachable)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::Http(HttpError::Rejected(_))
                | AuthError::Http(HttpError::Status { status: 400..=499, .. })
        )
    }
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;
