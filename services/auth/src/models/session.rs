//! Session model and related functionality

use common::lenient::text;
use serde_json::Value;

use super::{Role, UserProfile};

/// The persisted login state
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Option<Role>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_owner(&self) -> bool {
        self.role == Some(Role::Owner)
    }
}

/// `data` payload of the login and Google login endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl AuthPayload {
    /// A malformed `user` reads as no user; it never costs the token
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            token: text(map, &["token", "accessToken"]),
            user: map.get("user").and_then(UserProfile::from_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_tolerates_malformed_user() {
        let payload = AuthPayload::from_value(&json!({"token": "t-1", "user": "oops"}));
        assert_eq!(payload.token.as_deref(), Some("t-1"));
        assert!(payload.user.is_none());
    }

    #[test]
    fn test_payload_keeps_user_with_repeated_fields() {
        let payload = AuthPayload::from_value(&json!({
            "token": "t-1",
            "accessToken": "t-2",
            "user": {"id": 9, "user_id": 9, "profile_image": "a.png", "profileImage": "a.png"}
        }));
        assert_eq!(payload.token.as_deref(), Some("t-1"));
        let user = payload.user.unwrap();
        assert_eq!(user.id.as_deref(), Some("9"));
        assert_eq!(user.profile_image.as_deref(), Some("a.png"));
        assert!(AuthPayload::from_value(&json!([1])).token.is_none());
    }
}
