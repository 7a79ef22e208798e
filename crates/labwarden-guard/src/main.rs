//! labwarden guard binary.
//!
//! - Strict YAML config (listen address, rate-limit classes)
//! - Role tables from SUPER_ADMINS/ADMINS/MODERATORS/USERS/GUESTS env vars
//! - Companion HTTP API: /v1/command
//! - Ops endpoints: /healthz, /readyz, /metrics

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use labwarden_guard::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path =
        std::env::var("LABWARDEN_CONFIG").unwrap_or_else(|_| "labwarden.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let policy = config::roles_from_env();
    if policy.assignment_count() == 0 {
        tracing::warn!("no role assignments loaded; privileged commands are unreachable");
    }

    let state = app_state::AppState::new(cfg, policy).expect("app state build failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "labwarden-guard starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
