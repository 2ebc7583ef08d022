//! Field lookup for records whose key names and JSON types the backend does
//! not keep stable
//!
//! Each helper takes the accepted spellings of one field in preference order.
//! The first spelling holding a usable value wins; a payload carrying several
//! spellings of the same field is fine. A value of an unexpected type reads
//! as `None` instead of failing the whole record.

use serde_json::{Map, Value};

use crate::normalize::display_text;

/// First non-null value among `keys`
pub fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Strings, numbers and bools as text; blank strings count as absent
pub fn text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(display_text)
}

/// Finite numbers and numeric strings as `f64`
pub fn number(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(as_number)
        .filter(|n| n.is_finite())
}

/// Numbers and numeric strings as `i64`, truncating fractions
pub fn integer(map: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    number(map, keys).map(|n| n as i64)
}

/// The raw value, `Null` when absent; for fields the normalizers decode
pub fn raw(map: &Map<String, Value>, keys: &[&str]) -> Value {
    lookup(map, keys).cloned().unwrap_or(Value::Null)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_first_usable_spelling_wins() {
        let map = object(json!({"id": null, "user_id": 9, "_id": "x", "name": "  "}));
        assert_eq!(text(&map, &["id", "user_id", "_id"]).as_deref(), Some("9"));
        assert_eq!(text(&map, &["name", "fullName"]), None);

        let map = object(json!({"profile_image": "a.png", "profileImage": "b.png"}));
        assert_eq!(
            text(&map, &["profile_image", "profileImage"]).as_deref(),
            Some("a.png")
        );
    }

    #[test]
    fn test_bad_types_read_as_absent() {
        let map = object(json!({"rating": "4.2", "rooms": {"bad": 1}, "price": "n/a"}));
        assert_eq!(number(&map, &["rating"]), Some(4.2));
        assert_eq!(integer(&map, &["rooms"]), None);
        assert_eq!(number(&map, &["price", "rent"]), None);
        assert_eq!(raw(&map, &["images"]), Value::Null);
        assert_eq!(raw(&map, &["rooms"]), json!({"bad": 1}));
    }
}
