use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn version() -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "git_sha": env!("GIT_SHA"),
    }))
}

/// Number of connected WebSocket clients.
pub async fn session_count(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "count": state.registry.len() }))
}
