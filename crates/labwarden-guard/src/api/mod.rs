//! Companion HTTP API.
//!
//! One endpoint: `POST /v1/command`. Admission failures (rate limited,
//! blocked, not allowed) are normal `200 {ok:false,...}` responses so remote
//! callers get the same rendering a chat frontend would produce; only a
//! malformed body is a transport-level error.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;

use labwarden_core::error::WardenError;

use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub caller_id: String,
    pub command: String,
    /// Optional command payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

pub async fn command(
    State(app): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Json<serde_json::Value> {
    let result = app
        .dispatcher()
        .dispatch(&req.caller_id, &req.command, req.data.as_deref())
        .await;

    match result {
        Ok(data) => Json(json!({ "ok": true, "data": data })),
        Err(e) => Json(error_body(&e)),
    }
}

fn error_body(e: &WardenError) -> serde_json::Value {
    let mut body = json!({
        "ok": false,
        "code": e.client_code().as_str(),
        "msg": e.to_string(),
    });
    // Blocked callers get a static message on purpose: no unblock time exists.
    if let WardenError::RateLimited { retry_after_secs } = e {
        body["retry_after_secs"] = json!(retry_after_secs);
    }
    body
}
