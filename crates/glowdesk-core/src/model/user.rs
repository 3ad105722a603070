// ── Session user types ──

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Account role. `Admin` is the privileged role that passes the session
/// gate; anything unrecognized deserializes to `Unknown` and is treated
/// like any other non-privileged role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
    Customer,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

/// The authenticated user. Exactly one current session at a time;
/// absent entirely when unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Registration form data. Passwords stay wrapped until the request body
/// is built.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
    pub role: Role,
    pub phone: Option<String>,
}
