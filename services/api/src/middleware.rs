//! Login gate for authenticated backend calls
//!
//! Every repository method that needs a bearer token goes through
//! [`require_login`] before building its request, so a missing session never
//! reaches the network.

use auth::{Role, SessionManager};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// The stored token, or `LoginRequired`
pub async fn require_login(session: &SessionManager) -> ApiResult<String> {
    match session.token().await? {
        Some(token) => Ok(token),
        None => {
            debug!("No session token, login required");
            Err(ApiError::LoginRequired)
        }
    }
}

/// The stored token of an owner session
///
/// Sessions without a stored role are let through; the backend decides.
pub async fn require_owner(session: &SessionManager) -> ApiResult<String> {
    let token = require_login(session).await?;

    match session.role().await? {
        Some(Role::User) => Err(ApiError::BadRequest(
            "This page is only available to PG owners".to_string(),
        )),
        _ => Ok(token),
    }
}
