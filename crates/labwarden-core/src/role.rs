//! Role tiers and their total privilege order.
//!
//! Tiers are totally ordered: SuperAdmin > Admin > Moderator > User > Guest.
//! Holding a higher tier implies every permission of the tiers below it, so
//! "requires Moderator" is satisfied by Admin and SuperAdmin as well.

use serde::{Deserialize, Serialize};

/// Privilege tier assigned to a caller.
///
/// Variant order is ascending so the derived `Ord` matches the privilege
/// order (`Role::Guest < Role::SuperAdmin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Lowest tier: read-only visitors.
    Guest,
    /// Regular users.
    User,
    /// Moderators.
    Moderator,
    /// Administrators.
    Admin,
    /// Highest tier: full control.
    SuperAdmin,
}

impl Role {
    /// All tiers in descending privilege order (highest first).
    pub const TIERS: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Moderator,
        Role::User,
        Role::Guest,
    ];

    /// Stable name used in config, logs, and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::User => "USER",
            Role::Guest => "GUEST",
        }
    }

    /// Environment variable holding this tier's assignment table.
    pub fn env_var(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMINS",
            Role::Admin => "ADMINS",
            Role::Moderator => "MODERATORS",
            Role::User => "USERS",
            Role::Guest => "GUESTS",
        }
    }

    /// Parse a tier name (case-insensitive). Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" | "SUPERADMIN" => Some(Role::SuperAdmin),
            "ADMIN" => Some(Role::Admin),
            "MODERATOR" => Some(Role::Moderator),
            "USER" => Some(Role::User),
            "GUEST" => Some(Role::Guest),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
