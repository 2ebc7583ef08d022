//! Role model and related functionality

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace role a session is logged in as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Lists and manages PGs
    Owner,
    /// Browses and books PGs
    User,
}

impl Role {
    /// Value persisted under `hlopgRole`
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::User => "USER",
        }
    }

    /// Path segment of the role's login endpoint
    pub fn login_segment(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OWNER" => Ok(Role::Owner),
            "USER" => Ok(Role::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_storage_text() {
        assert_eq!("OWNER".parse::<Role>(), Ok(Role::Owner));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("ADMIN".parse::<Role>().is_err());
        assert_eq!(Role::Owner.to_string(), "OWNER");
        assert_eq!(Role::User.login_segment(), "user");
    }
}
