//! airmon agent binary.
//!
//! - Loads the YAML config (strict parsing + validation)
//! - Builds the shared registry and spawns one task per configured sensor
//! - Serves `/healthz` and the OpenMetrics exposition endpoint

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use airmon_agent::{app_state, config, router, sources};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg_path = std::env::args().nth(1).unwrap_or_else(|| "airmon.yaml".into());
    let cfg = config::load_from_file(&cfg_path).expect("config load failed");
    let listen: SocketAddr = cfg
        .agent
        .listen
        .parse()
        .expect("agent.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg);

    let registry = state.registry();
    sources::spawn_all(&state.cfg().sources, &registry);

    let app = router::build_router(state);

    tracing::info!(%listen, "airmon-agent starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
