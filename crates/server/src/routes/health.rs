//! Health checks.

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Liveness: the process is serving requests.
async fn health() -> &'static str {
    "ok"
}

/// Readiness: the state store answers. 503 otherwise.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.controller().ping().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
