use async_trait::async_trait;
use serde_json::value::RawValue;
use serde_json::{json, Value};

use labwarden_core::error::Result;
use labwarden_core::Role;

use crate::dispatch::{Command, CommandCtx};

/// Echo the caller's resolved identity. Public: an unassigned caller gets
/// `username: null, role: null` rather than a refusal.
#[derive(Default)]
pub struct WhoamiCommand;

impl WhoamiCommand {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn required_roles(&self) -> &'static [Role] {
        &[]
    }

    async fn handle(&self, ctx: CommandCtx, _data: Option<&RawValue>) -> Result<Value> {
        let caller_id = ctx.caller_id();
        Ok(json!({
            "caller_id": caller_id,
            "username": ctx.policy.username_of(caller_id),
            "role": ctx.policy.role_of(caller_id).map(Role::as_str),
        }))
    }
}
