//! Shared application state for the labwarden guard.
//!
//! Construction wires config into the limiter, the env-sourced role tables
//! into the policy, and registers the built-in commands. Startup errors are
//! explicit (Result instead of panic).

use std::sync::Arc;
use std::time::Instant;

use labwarden_core::authz::AuthorizationPolicy;
use labwarden_core::error::Result;

use crate::commands::{AdminUnblockCommand, StatusCommand, WhoamiCommand};
use crate::config::GuardConfig;
use crate::dispatch::Dispatcher;
use crate::obs::metrics::GuardMetrics;
use crate::ratelimit::{self, RateLimiter};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GuardConfig,
    policy: Arc<AuthorizationPolicy>,
    limiter: Arc<RateLimiter>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GuardMetrics>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GuardConfig, policy: AuthorizationPolicy) -> Result<Self> {
        let started = Instant::now();

        let policy = Arc::new(policy);
        let limiter = Arc::new(RateLimiter::new(&cfg.limits));
        let metrics = Arc::new(GuardMetrics::default());

        let classify = ratelimit::default_classifier(cfg.limits.admin_prefix.clone());
        let dispatcher = Dispatcher::new(
            Arc::clone(&policy),
            Arc::clone(&limiter),
            classify,
            Arc::clone(&metrics),
        );

        dispatcher.register(Arc::new(StatusCommand::new(started)));
        dispatcher.register(Arc::new(WhoamiCommand::new()));
        dispatcher.register(Arc::new(AdminUnblockCommand::new()));

        // classifier <-> limits sanity check: the standard classifier only
        // ever emits default/auth/admin, so any other configured class is
        // unreachable dead config.
        for c in &cfg.limits.classes {
            let reachable = matches!(
                c.class.as_str(),
                ratelimit::CLASS_DEFAULT | ratelimit::CLASS_AUTH | ratelimit::CLASS_ADMIN
            );
            if !reachable {
                tracing::warn!(class = %c.class, "limit class is unreachable from the classifier");
            }
        }

        tracing::info!(
            assignments = policy.assignment_count(),
            classes = cfg.limits.classes.len(),
            "admission state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                policy,
                limiter,
                dispatcher: Arc::new(dispatcher),
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &GuardConfig {
        &self.inner.cfg
    }

    pub fn policy(&self) -> Arc<AuthorizationPolicy> {
        Arc::clone(&self.inner.policy)
    }

    pub fn limiter(&self) -> Arc<RateLimiter> {
        Arc::clone(&self.inner.limiter)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.inner.dispatcher)
    }

    pub fn metrics(&self) -> Arc<GuardMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Gauge lines appended to `/metrics` on each render.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![
            (
                "labwarden_blocked_callers",
                self.inner.limiter.blocked_count() as u64,
            ),
            (
                "labwarden_role_assignments",
                self.inner.policy.assignment_count() as u64,
            ),
            (
                "labwarden_commands_registered",
                self.inner.dispatcher.command_count() as u64,
            ),
        ]
    }
}
