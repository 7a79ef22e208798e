//! Role-table authorization policy.
//!
//! Construct once at startup from the tier tables, then share via `Arc`.
//! The policy is pure and immutable: every query is a lookup over loaded
//! state, and an unknown caller is a normal `None`/`false`, never an error.

use std::collections::HashMap;

use crate::role::Role;

/// One `username|caller_id` pair loaded into a tier.
///
/// Duplicate caller_ids (same id under several usernames, or under several
/// tiers) are kept as loaded; `role_of` resolves them highest-tier-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Display name for logs and replies.
    pub username: String,
    /// Stable external identity presented with every request.
    pub caller_id: String,
}

/// Decides whether a caller may invoke an action requiring a minimum role.
#[derive(Debug, Default)]
pub struct AuthorizationPolicy {
    tiers: HashMap<Role, Vec<RoleAssignment>>,
}

impl AuthorizationPolicy {
    /// Build the policy from per-tier spec strings of the form
    /// `username|caller_id,username|caller_id,...`.
    ///
    /// Entries missing the `|` separator are skipped, not rejected: a
    /// half-written table must never keep the process from booting, and the
    /// remaining entries still load.
    pub fn from_tier_specs<'a, I>(specs: I) -> Self
    where
        I: IntoIterator<Item = (Role, &'a str)>,
    {
        let mut tiers: HashMap<Role, Vec<RoleAssignment>> = HashMap::new();

        for (role, spec) in specs {
            let tier = tiers.entry(role).or_default();
            for entry in spec.split(',') {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                let Some((username, caller_id)) = entry.split_once('|') else {
                    tracing::debug!(tier = %role, %entry, "skipping malformed role entry");
                    continue;
                };
                tier.push(RoleAssignment {
                    username: username.trim().to_string(),
                    caller_id: caller_id.trim().to_string(),
                });
            }
        }

        Self { tiers }
    }

    /// Highest tier containing `caller_id`, scanning from SuperAdmin down.
    pub fn role_of(&self, caller_id: &str) -> Option<Role> {
        Role::TIERS
            .into_iter()
            .find(|role| self.tier_contains(*role, caller_id))
    }

    /// Username recorded for `caller_id`, resolved highest-tier-first.
    pub fn username_of(&self, caller_id: &str) -> Option<&str> {
        Role::TIERS.into_iter().find_map(|role| {
            self.tiers.get(&role).and_then(|tier| {
                tier.iter()
                    .find(|a| a.caller_id == caller_id)
                    .map(|a| a.username.as_str())
            })
        })
    }

    /// True iff the caller holds `role` or any tier above it.
    pub fn has_at_least(&self, caller_id: &str, role: Role) -> bool {
        match self.role_of(caller_id) {
            Some(held) => held >= role,
            None => false,
        }
    }

    /// True iff the caller satisfies *any* of the required roles (logical OR).
    ///
    /// An empty requirement admits nobody; callers wanting a public action
    /// should skip the check instead of passing an empty set.
    pub fn is_allowed(&self, caller_id: &str, required: &[Role]) -> bool {
        required.iter().any(|r| self.has_at_least(caller_id, *r))
    }

    /// Total number of loaded assignments across all tiers.
    pub fn assignment_count(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    fn tier_contains(&self, role: Role, caller_id: &str) -> bool {
        self.tiers
            .get(&role)
            .is_some_and(|tier| tier.iter().any(|a| a.caller_id == caller_id))
    }
}
