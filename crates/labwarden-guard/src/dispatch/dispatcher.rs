//! Command registry and admission pipeline.
//!
//! Every dispatch runs the same gate order: classify the command, pass the
//! rate limiter, resolve the handler, pass the authorization policy, then
//! execute. Admission verdicts come back from the limiter as values; this
//! layer owns turning them into client-facing errors.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::value::RawValue;
use serde_json::Value;

use labwarden_core::authz::AuthorizationPolicy;
use labwarden_core::error::{Result, WardenError};
use labwarden_core::Role;

use crate::obs::metrics::GuardMetrics;
use crate::ratelimit::{ActionClassifier, RateLimiter, Verdict};

/// A named command exposed through the dispatcher.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// Roles that may invoke this command (any-of). Empty means public.
    fn required_roles(&self) -> &'static [Role];

    async fn handle(&self, ctx: CommandCtx, data: Option<&RawValue>) -> Result<Value>;
}

/// Per-dispatch context handed to command handlers.
#[derive(Clone)]
pub struct CommandCtx {
    pub caller_id: String,
    pub policy: Arc<AuthorizationPolicy>,
    pub limiter: Arc<RateLimiter>,
}

impl CommandCtx {
    pub fn caller_id(&self) -> &str {
        &self.caller_id
    }
}

/// Registry and admission pipeline for commands.
pub struct Dispatcher {
    commands: DashMap<&'static str, Arc<dyn Command>>,
    policy: Arc<AuthorizationPolicy>,
    limiter: Arc<RateLimiter>,
    classify: ActionClassifier,
    metrics: Arc<GuardMetrics>,
}

impl Dispatcher {
    pub fn new(
        policy: Arc<AuthorizationPolicy>,
        limiter: Arc<RateLimiter>,
        classify: ActionClassifier,
        metrics: Arc<GuardMetrics>,
    ) -> Self {
        Self {
            commands: DashMap::new(),
            policy,
            limiter,
            classify,
            metrics,
        }
    }

    pub fn register(&self, cmd: Arc<dyn Command>) {
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn registered_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|e| *e.key()).collect()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Rate-limit class the configured classifier assigns to `command`.
    pub fn class_of(&self, command: &str) -> &'static str {
        (self.classify)(command)
    }

    /// Run the full admission pipeline and, if it passes, the handler.
    pub async fn dispatch(
        &self,
        caller_id: &str,
        command: &str,
        data: Option<&RawValue>,
    ) -> Result<Value> {
        let class = (self.classify)(command);

        // Rate limit gates first so a flooding caller never reaches authz.
        match self.limiter.check(caller_id, class) {
            Verdict::Admitted => {
                self.metrics
                    .admission_total
                    .inc(&[("class", class), ("decision", "admitted")]);
            }
            Verdict::Denied { retry_after_secs } => {
                self.metrics
                    .admission_total
                    .inc(&[("class", class), ("decision", "denied")]);
                self.observe_outcome(command, "rate_limited");
                return Err(WardenError::RateLimited { retry_after_secs });
            }
            Verdict::Blocked => {
                self.metrics
                    .admission_total
                    .inc(&[("class", class), ("decision", "blocked")]);
                self.observe_outcome(command, "blocked");
                return Err(WardenError::Blocked);
            }
        }

        let handler = match self.commands.get(command) {
            Some(entry) => entry.value().clone(),
            None => {
                self.observe_outcome(command, "unknown");
                return Err(WardenError::BadRequest(format!(
                    "unknown command: {command}"
                )));
            }
        };

        let required = handler.required_roles();
        if !required.is_empty() && !self.policy.is_allowed(caller_id, required) {
            tracing::debug!(%caller_id, %command, "caller lacks required role");
            self.observe_outcome(command, "not_allowed");
            return Err(WardenError::NotAllowed(format!(
                "{command} requires one of: {}",
                role_list(required)
            )));
        }

        let ctx = CommandCtx {
            caller_id: caller_id.to_string(),
            policy: Arc::clone(&self.policy),
            limiter: Arc::clone(&self.limiter),
        };

        match handler.handle(ctx, data).await {
            Ok(v) => {
                self.observe_outcome(command, "ok");
                Ok(v)
            }
            Err(e) => {
                self.observe_outcome(command, e.client_code().as_str());
                Err(e)
            }
        }
    }

    fn observe_outcome(&self, command: &str, outcome: &str) {
        self.metrics
            .commands_total
            .inc(&[("command", command), ("outcome", outcome)]);
    }
}

fn role_list(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
