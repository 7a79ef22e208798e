//! Authorization policy table tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use labwarden_core::authz::AuthorizationPolicy;
use labwarden_core::Role;

fn policy() -> AuthorizationPolicy {
    AuthorizationPolicy::from_tier_specs([
        (Role::SuperAdmin, "root|100"),
        (Role::Admin, "alice|200,bob|201"),
        (Role::Moderator, "carol|300"),
        (Role::User, "dave|400"),
        (Role::Guest, "erin|500"),
    ])
}

#[test]
fn role_of_resolves_each_tier() {
    let p = policy();
    assert_eq!(p.role_of("100"), Some(Role::SuperAdmin));
    assert_eq!(p.role_of("201"), Some(Role::Admin));
    assert_eq!(p.role_of("300"), Some(Role::Moderator));
    assert_eq!(p.role_of("400"), Some(Role::User));
    assert_eq!(p.role_of("500"), Some(Role::Guest));
    assert_eq!(p.role_of("999"), None);
}

#[test]
fn highest_tier_wins_on_duplicate_assignment() {
    // Same caller_id listed under two tiers: highest must win.
    let p = AuthorizationPolicy::from_tier_specs([
        (Role::Admin, "alice|200"),
        (Role::User, "alice-alt|200"),
    ]);
    assert_eq!(p.role_of("200"), Some(Role::Admin));
    assert_eq!(p.username_of("200"), Some("alice"));
}

#[test]
fn has_at_least_follows_hierarchy() {
    let p = policy();
    // Moderator qualifies at or below, never above.
    for role in Role::TIERS {
        let expected = Role::Moderator >= role;
        assert_eq!(p.has_at_least("300", role), expected, "tier {role}");
    }
    assert!(!p.has_at_least("999", Role::Guest));
}

#[test]
fn is_allowed_is_or_across_required_roles() {
    let p = policy();
    // Moderator-only caller passes a {SuperAdmin, Moderator} requirement.
    assert!(p.is_allowed("300", &[Role::SuperAdmin, Role::Moderator]));
    // User-only caller fails the same requirement.
    assert!(!p.is_allowed("400", &[Role::SuperAdmin, Role::Moderator]));
    // Admin outranks Moderator.
    assert!(p.is_allowed("200", &[Role::Moderator]));
    // No assignment at all fails even the lowest requirement.
    assert!(!p.is_allowed("u1", &[Role::Guest]));
}

#[test]
fn malformed_entries_are_skipped_not_fatal() {
    let p = AuthorizationPolicy::from_tier_specs([
        // "broken" has no separator and must register nothing.
        (Role::Admin, "alice|200,broken,bob|201"),
        (Role::Guest, "no-separator-at-all"),
    ]);
    assert_eq!(p.role_of("200"), Some(Role::Admin));
    assert_eq!(p.role_of("201"), Some(Role::Admin));
    assert_eq!(p.role_of("broken"), None);
    assert_eq!(p.assignment_count(), 2);
}

#[test]
fn empty_and_missing_tiers_are_empty_not_errors() {
    let p = AuthorizationPolicy::from_tier_specs([(Role::Admin, ""), (Role::User, " , ,")]);
    assert_eq!(p.assignment_count(), 0);
    assert_eq!(p.role_of("200"), None);
}

#[test]
fn username_lookup() {
    let p = policy();
    assert_eq!(p.username_of("201"), Some("bob"));
    assert_eq!(p.username_of("999"), None);
}
