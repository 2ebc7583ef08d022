//! Booking requests and the user's booking history

use auth::validation;
use chrono::NaiveDate;
use common::lenient::text;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Booking request as sent to `POST /booking/request`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingRequest {
    pub hostel_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub sharing_type: String,
    pub booking_date: String,
}

impl BookingRequest {
    /// Check every field before anything is sent
    pub fn validate(&self) -> ApiResult<NaiveDate> {
        if self.hostel_id.trim().is_empty() {
            return Err(ApiError::BadRequest("Hostel is required".to_string()));
        }
        validation::validate_name(&self.user_name).map_err(ApiError::BadRequest)?;
        validation::validate_email(&self.user_email).map_err(ApiError::BadRequest)?;
        validation::validate_phone(&self.user_phone).map_err(ApiError::BadRequest)?;
        if self.sharing_type.trim().is_empty() {
            return Err(ApiError::BadRequest("Select a sharing type".to_string()));
        }

        NaiveDate::parse_from_str(self.booking_date.trim(), DATE_FORMAT).map_err(|_| {
            ApiError::BadRequest("Booking date must be a valid date (YYYY-MM-DD)".to_string())
        })
    }

    /// Trimmed copy for the wire
    pub fn normalized(&self) -> Self {
        Self {
            hostel_id: self.hostel_id.trim().to_string(),
            user_name: self.user_name.trim().to_string(),
            user_email: self.user_email.trim().to_string(),
            user_phone: self.user_phone.trim().to_string(),
            sharing_type: self.sharing_type.trim().to_string(),
            booking_date: self.booking_date.trim().to_string(),
        }
    }
}

/// One entry of `GET /booking/my-bookings`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Booking {
    pub id: Option<String>,
    pub hostel_id: Option<String>,
    pub hostel_name: Option<String>,
    pub sharing_type: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub amount: Option<String>,
}

impl Booking {
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;

        Some(Self {
            id: text(map, &["booking_id", "id"]),
            hostel_id: text(map, &["hostel_id", "hostelId"]),
            hostel_name: text(map, &["hostel_name", "hostelName"]),
            sharing_type: text(map, &["sharing_type", "sharingType"]),
            booking_date: text(map, &["booking_date", "bookingDate"])
                .and_then(|date| parse_date(&date)),
            status: text(map, &["status"]),
            amount: text(map, &["amount", "price"]),
        })
    }

    pub fn list_from(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().filter_map(Self::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Dates arrive as `YYYY-MM-DD` or as full timestamps
fn parse_date(text: &str) -> Option<NaiveDate> {
    let day = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> BookingRequest {
        BookingRequest {
            hostel_id: "17".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@hlopg.com".to_string(),
            user_phone: "9876543210".to_string(),
            sharing_type: "double".to_string(),
            booking_date: "2026-11-01".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert_eq!(
            request().validate().unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
    }

    #[test]
    fn test_nine_digit_phone_is_rejected() {
        let request = BookingRequest {
            user_phone: "987654321".to_string(),
            ..request()
        };
        let message = match request.validate() {
            Err(ApiError::BadRequest(message)) => message,
            other => panic!("unexpected result: {other:?}"),
        };
        assert_eq!(message, "Phone number must be exactly 10 digits");
    }

    #[test]
    fn test_bad_fields_are_rejected() {
        for broken in [
            BookingRequest {
                user_email: "nope".to_string(),
                ..request()
            },
            BookingRequest {
                user_name: " ".to_string(),
                ..request()
            },
            BookingRequest {
                sharing_type: String::new(),
                ..request()
            },
            BookingRequest {
                booking_date: "01/11/2026".to_string(),
                ..request()
            },
            BookingRequest {
                hostel_id: String::new(),
                ..request()
            },
        ] {
            assert!(broken.validate().is_err(), "{:?}", broken);
        }
    }

    #[test]
    fn test_history_entry_tolerates_shapes() {
        let bookings = Booking::list_from(&json!([
            {
                "id": 3,
                "hostelName": "Green Nest",
                "bookingDate": "2026-10-01T10:00:00Z",
                "amount": 6500
            },
            "junk"
        ]));
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id.as_deref(), Some("3"));
        assert_eq!(bookings[0].booking_date, NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(bookings[0].amount.as_deref(), Some("6500"));
    }
}
