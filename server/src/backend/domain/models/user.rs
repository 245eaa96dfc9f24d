//! Domain model for a login identity.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed id of the built-in administrator. Imports always reset the current
/// identity to this user.
pub const ADMIN_USER_ID: &str = "user::admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Mentor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Mentor => "mentor",
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
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "mentor" => Ok(Role::Mentor),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub name: String,
}

impl User {
    /// The single seeded operator identity.
    pub fn built_in_admin() -> Self {
        Self {
            id: ADMIN_USER_ID.to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            name: "Administrator".to_string(),
        }
    }
}
