//! User entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

/// Stored account. The password hash is a PHC string and never leaves the
/// auth layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

/// Global account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownVariant::new("role", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);

        for rejected in ["", "Admin", "ADMIN", "moderator", " user", "user "] {
            assert!(rejected.parse::<Role>().is_err(), "{rejected:?} must be rejected");
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
