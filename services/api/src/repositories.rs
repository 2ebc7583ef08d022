//! Repositories for backend entities
//!
//! One repository per entity; every page-level view goes through these
//! instead of issuing its own requests.

use serde_json::Value;

pub mod bookings;
pub mod dashboard;
pub mod food_menu;
pub mod hostels;
pub mod likes;

pub use bookings::BookingRepository;
pub use dashboard::DashboardRepository;
pub use food_menu::FoodMenuRepository;
pub use hostels::HostelRepository;
pub use likes::LikeRepository;

static NULL: Value = Value::Null;

/// First non-null payload field among `keys`
///
/// A bare array at the root is accepted as the payload itself.
pub(crate) fn list_field<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
    if value.is_array() {
        return value;
    }
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|field| !field.is_null())
        .unwrap_or(&NULL)
}

/// `value[key]` when present, the envelope itself otherwise
pub(crate) fn field_or_root<'a>(value: &'a Value, key: &str) -> &'a Value {
    match value.get(key) {
        Some(field) if !field.is_null() => field,
        _ => value,
    }
}

/// Numeric ids go out as numbers, anything else as text
pub(crate) fn wire_id(id: &str) -> Value {
    id.trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(id.trim()))
}
