use labwarden_core::error::{Result, WardenError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub limits: LimitsSection,
}

impl GuardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WardenError::UnsupportedVersion);
        }

        self.limits.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Rate-limit class table plus escalation parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    /// Command-name prefix routed to the `admin` class.
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,

    /// Violations before a caller is blocked.
    #[serde(default = "default_block_threshold")]
    pub block_threshold: u32,

    #[serde(default = "default_classes")]
    pub classes: Vec<ClassLimit>,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            admin_prefix: default_admin_prefix(),
            block_threshold: default_block_threshold(),
            classes: default_classes(),
        }
    }
}

impl LimitsSection {
    pub fn validate(&self) -> Result<()> {
        if self.admin_prefix.is_empty() {
            return Err(WardenError::BadRequest(
                "limits.admin_prefix must not be empty".into(),
            ));
        }
        if self.block_threshold == 0 {
            return Err(WardenError::BadRequest(
                "limits.block_threshold must be at least 1".into(),
            ));
        }
        if !self.classes.iter().any(|c| c.class == "default") {
            return Err(WardenError::BadRequest(
                "limits.classes must include the default class".into(),
            ));
        }

        for (i, c) in self.classes.iter().enumerate() {
            if c.max_attempts == 0 {
                return Err(WardenError::BadRequest(format!(
                    "limits.classes[{}].max_attempts must be at least 1",
                    c.class
                )));
            }
            if !(1..=86_400).contains(&c.window_seconds) {
                return Err(WardenError::BadRequest(format!(
                    "limits.classes[{}].window_seconds must be between 1 and 86400",
                    c.class
                )));
            }
            if self.classes[..i].iter().any(|p| p.class == c.class) {
                return Err(WardenError::BadRequest(format!(
                    "limits.classes has duplicate class: {}",
                    c.class
                )));
            }
        }

        Ok(())
    }
}

/// Per-class admission parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassLimit {
    pub class: String,
    pub max_attempts: u32,
    pub window_seconds: u64,
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_admin_prefix() -> String {
    "admin_".into()
}
fn default_block_threshold() -> u32 {
    3
}

// Class limits carried over from the bot's original tables.
fn default_classes() -> Vec<ClassLimit> {
    vec![
        ClassLimit {
            class: "default".into(),
            max_attempts: 5,
            window_seconds: 60,
        },
        ClassLimit {
            class: "auth".into(),
            max_attempts: 3,
            window_seconds: 300,
        },
        ClassLimit {
            class: "admin".into(),
            max_attempts: 10,
            window_seconds: 60,
        },
    ]
}
