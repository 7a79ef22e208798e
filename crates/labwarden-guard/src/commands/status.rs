use std::time::Instant;

use async_trait::async_trait;
use serde_json::value::RawValue;
use serde_json::{json, Value};

use labwarden_core::error::Result;
use labwarden_core::Role;

use crate::dispatch::{Command, CommandCtx};

/// Public liveness summary for the lab.
pub struct StatusCommand {
    started: Instant,
}

impl StatusCommand {
    pub fn new(started: Instant) -> Self {
        Self { started }
    }
}

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &'static str {
        "status"
    }

    fn required_roles(&self) -> &'static [Role] {
        &[]
    }

    async fn handle(&self, ctx: CommandCtx, _data: Option<&RawValue>) -> Result<Value> {
        Ok(json!({
            "uptime_secs": self.started.elapsed().as_secs(),
            "blocked_callers": ctx.limiter.blocked_count(),
            "role_assignments": ctx.policy.assignment_count(),
        }))
    }
}
