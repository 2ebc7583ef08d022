//! Custom error types for the marketplace client

use auth::AuthError;
use common::{HttpError, StorageError};
use thiserror::Error;

/// Custom error type for repositories and views
#[derive(Error, Debug)]
pub enum ApiError {
    /// No session; surfaced as a login prompt
    #[error("Login required")]
    LoginRequired,

    /// Input rejected before any request was sent
    #[error("{0}")]
    BadRequest(String),

    /// The backend has no such entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend error
    #[error("Backend error: {0}")]
    Http(#[from] HttpError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication flow error
    #[error(transparent)]
    Auth(AuthError),
}

impl ApiError {
    pub fn is_login_required(&self) -> bool {
        matches!(self, ApiError::LoginRequired)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::LoginRequired => ApiError::LoginRequired,
            AuthError::Validation(message) => ApiError::BadRequest(message),
            AuthError::Http(err) => ApiError::Http(err),
            AuthError::Storage(err) => ApiError::Storage(err),
            other => ApiError::Auth(other),
        }
    }
}

/// Type alias for client results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_keep_their_meaning() {
        assert!(ApiError::from(AuthError::LoginRequired).is_login_required());
        assert!(matches!(
            ApiError::from(AuthError::Validation("Enter 4-digit OTP".to_string())),
            ApiError::BadRequest(message) if message == "Enter 4-digit OTP"
        ));
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).to_string(),
            "Invalid email / phone or password"
        );
    }
}
