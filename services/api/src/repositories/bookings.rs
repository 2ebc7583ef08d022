//! Booking requests and history

use auth::SessionManager;
use common::Backend;
use common::normalize::display_text;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::middleware::require_login;
use crate::models::{Booking, BookingRequest};

use super::{list_field, wire_id};

pub const BOOKING_CONFIRMATION: &str = "Booking request sent";

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    backend: Backend,
    session: SessionManager,
}

impl BookingRepository {
    pub fn new(backend: Backend, session: SessionManager) -> Self {
        Self { backend, session }
    }

    /// Send a booking request; never retried
    ///
    /// The request is validated before the session is even looked at.
    pub async fn request(&self, request: &BookingRequest) -> ApiResult<String> {
        let date = request.validate()?;
        let token = require_login(&self.session).await?;

        let request = request.normalized();
        info!(
            "Requesting {} booking at hostel {} for {}",
            request.sharing_type, request.hostel_id, date
        );

        let mut body = serde_json::to_value(&request)
            .map_err(|e| ApiError::BadRequest(format!("Unserializable booking: {}", e)))?;
        body["hostel_id"] = wire_id(&request.hostel_id);
        let value = self
            .backend
            .post_json("/booking/request", body, Some(&token))
            .await?;

        Ok(value
            .get("message")
            .and_then(display_text)
            .unwrap_or_else(|| BOOKING_CONFIRMATION.to_string()))
    }

    /// The logged-in user's own bookings
    pub async fn history(&self) -> ApiResult<Vec<Booking>> {
        let token = require_login(&self.session).await?;

        let value = self
            .backend
            .get("/booking/my-bookings", &[], Some(&token))
            .await?;
        Ok(Booking::list_from(list_field(&value, &["data", "bookings"])))
    }
}
