//! Action-class mapping.
//!
//! Which class a command falls into is a policy decision owned by the
//! dispatcher, not by the limiter, so the mapping stays a pluggable closure.

/// Catch-all class.
pub const CLASS_DEFAULT: &str = "default";
/// Credential-shaped actions (tight window).
pub const CLASS_AUTH: &str = "auth";
/// Administrative actions.
pub const CLASS_ADMIN: &str = "admin";

/// Maps a command name to its rate-limit class.
pub type ActionClassifier = Box<dyn Fn(&str) -> &'static str + Send + Sync>;

/// Standard mapping: `login`/`authenticate` are `auth`, names starting with
/// the configured admin prefix are `admin`, everything else is `default`.
pub fn default_classifier(admin_prefix: String) -> ActionClassifier {
    Box::new(move |action| match action {
        "login" | "authenticate" => CLASS_AUTH,
        _ if action.starts_with(admin_prefix.as_str()) => CLASS_ADMIN,
        _ => CLASS_DEFAULT,
    })
}
