//! Guard config loader (strict parsing) and env-sourced role tables.

pub mod schema;

use std::fs;

use labwarden_core::authz::AuthorizationPolicy;
use labwarden_core::error::{Result, WardenError};
use labwarden_core::Role;

pub use schema::{ClassLimit, GuardConfig, LimitsSection, ServerSection};

pub fn load_from_file(path: &str) -> Result<GuardConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| WardenError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GuardConfig> {
    let cfg: GuardConfig = serde_yaml::from_str(s)
        .map_err(|e| WardenError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the role tables from the five tier environment variables
/// (`SUPER_ADMINS`, `ADMINS`, `MODERATORS`, `USERS`, `GUESTS`).
///
/// An absent variable yields an empty tier, not an error; malformed entries
/// inside a variable are skipped by the policy loader.
pub fn roles_from_env() -> AuthorizationPolicy {
    let specs: Vec<(Role, String)> = Role::TIERS
        .into_iter()
        .map(|role| (role, std::env::var(role.env_var()).unwrap_or_default()))
        .collect();
    AuthorizationPolicy::from_tier_specs(specs.iter().map(|(role, s)| (*role, s.as_str())))
}
