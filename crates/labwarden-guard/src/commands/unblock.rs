use async_trait::async_trait;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{json, Value};

use labwarden_core::error::{Result, WardenError};
use labwarden_core::Role;

use crate::dispatch::{Command, CommandCtx};

/// Lift a caller's block and reset its violation counter.
///
/// This is the only path out of the block set short of a restart.
#[derive(Default)]
pub struct AdminUnblockCommand;

impl AdminUnblockCommand {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct UnblockReq {
    caller_id: String,
}

#[async_trait]
impl Command for AdminUnblockCommand {
    fn name(&self) -> &'static str {
        "admin_unblock"
    }

    fn required_roles(&self) -> &'static [Role] {
        &[Role::Admin]
    }

    async fn handle(&self, ctx: CommandCtx, data: Option<&RawValue>) -> Result<Value> {
        let raw = data
            .ok_or_else(|| WardenError::BadRequest("admin_unblock requires data".into()))?;

        let req: UnblockReq = serde_json::from_str(raw.get())
            .map_err(|e| WardenError::BadRequest(format!("admin_unblock invalid data: {e}")))?;

        let lifted = ctx.limiter.unblock(&req.caller_id);
        if lifted {
            tracing::info!(by = %ctx.caller_id(), caller_id = %req.caller_id, "block lifted");
        }

        Ok(json!({
            "caller_id": req.caller_id,
            "unblocked": lifted,
        }))
    }
}
