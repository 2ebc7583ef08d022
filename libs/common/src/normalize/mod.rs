//! Normalizers for the loosely shaped fields of backend hostel records
//!
//! Every function here is pure and total: malformed input degrades to a
//! documented default instead of failing.

use serde_json::Value;
use std::borrow::Cow;

use crate::config::ClientConfig;

pub mod facilities;
pub mod food_menu;
pub mod image;
pub mod sharing;

pub use facilities::{DefaultFacilities, Facility, FacilityNormalizer, IconKey};
pub use food_menu::{MenuRow, reshape_menu};
pub use image::ImageResolver;
pub use sharing::{SharingPlan, format_sharing, sharing_plans};

/// Decode a field that may arrive either as native JSON or as a JSON string
///
/// Strings that do not parse are returned unchanged as `Value::String`.
pub(crate) fn decode_field(raw: &Value) -> Cow<'_, Value> {
    match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text.trim()) {
            // double-encoded payloads show up on older listings
            Ok(Value::String(inner)) => match serde_json::from_str::<Value>(inner.trim()) {
                Ok(value) => Cow::Owned(value),
                Err(_) => Cow::Owned(Value::String(inner)),
            },
            Ok(value) => Cow::Owned(value),
            Err(_) => Cow::Borrowed(raw),
        },
        other => Cow::Borrowed(other),
    }
}

/// Loose truthiness for flag values sent as bools, numbers or strings
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => {
            let text = text.trim();
            !text.is_empty() && !text.eq_ignore_ascii_case("false") && text != "0"
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as display text; whole floats lose their `.0`
///
/// Returns `None` for null, blank strings, arrays and objects.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                Some(number.to_string())
            } else {
                number.as_f64().map(|n| {
                    if n.fract() == 0.0 && n.abs() < 1e15 {
                        format!("{}", n as i64)
                    } else {
                        n.to_string()
                    }
                })
            }
        }
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The image resolver and facility normalizer configured together
#[derive(Debug, Clone)]
pub struct Normalizers {
    pub images: ImageResolver,
    pub facilities: FacilityNormalizer,
}

impl Normalizers {
    pub fn from_config(config: &ClientConfig) -> Self {
        let defaults = if config.default_facilities {
            DefaultFacilities::Placeholder
        } else {
            DefaultFacilities::None
        };

        Self {
            images: ImageResolver::new(&config.asset_origin, &config.placeholder_image),
            facilities: FacilityNormalizer::new(defaults),
        }
    }
}

impl Default for Normalizers {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_field_parses_strings_once_or_twice() {
        assert_eq!(*decode_field(&json!("{\"wifi\":true}")), json!({"wifi": true}));
        assert_eq!(
            *decode_field(&json!("\"{\\\"wifi\\\":true}\"")),
            json!({"wifi": true})
        );
        assert_eq!(*decode_field(&json!("a.jpg")), json!("a.jpg"));
        assert_eq!(*decode_field(&json!([1])), json!([1]));
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!("false")));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(&json!(5000)), Some("5000".to_string()));
        assert_eq!(display_text(&json!(5000.0)), Some("5000".to_string()));
        assert_eq!(display_text(&json!(49.5)), Some("49.5".to_string()));
        assert_eq!(display_text(&json!(" 4500 ")), Some("4500".to_string()));
        assert_eq!(display_text(&json!("  ")), None);
        assert_eq!(display_text(&Value::Null), None);
    }
}
