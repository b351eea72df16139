//! User identity data model.
//!
//! The identity is handed out by the remote API on login or signup and stays
//! immutable for the lifetime of a session; re-login replaces it wholesale.

use serde::{Deserialize, Serialize};

/// Role assigned to an account by the remote API.
///
/// Serialised in lowercase on the wire (`"user"`, `"supplier"`, `"admin"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account holder browsing the full complaint queue.
    User,
    /// Supplier submitting complaints; sees only their own queue.
    Supplier,
    /// Administrator with full edit and delete capability.
    Admin,
}

impl Role {
    /// Lowercase wire name for this role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Supplier => "supplier",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated account identity returned by the remote API.
///
/// ## Invariants
/// - Immutable for the session's lifetime; replaced wholesale on re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable account identifier assigned by the server.
    pub id: String,
    /// Display name shown in greetings and creator attributions.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Role driving the authorization policy.
    pub role: Role,
}
