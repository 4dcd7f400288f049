//! Operational HTTP endpoints.
//!
//! - `/healthz`        : liveness
//! - `<metrics_path>`  : OpenMetrics text exposition

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use airmon_core::render;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Scrape handler. Renders the registry under its lock and sends the body
/// verbatim; a render failure becomes a 500, never a truncated body.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match render::render(&state.registry(), state.labels()) {
        Ok(body) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, render::CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "exposition render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response()
        }
    }
}
