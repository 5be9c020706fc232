mod meta;
mod toggles;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. The dashboard client connects to the
/// bare host, so the WebSocket upgrade is served on `/` as well as `/ws`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(crate::gateway::ws_upgrade))
        .route("/ws", get(crate::gateway::ws_upgrade))
        .route("/health", get(meta::health))
        .route("/version", get(meta::version))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/toggles", get(toggles::list_toggles))
        .route("/toggles/{name}", post(toggles::flip_toggle))
        .route("/sessions", get(meta::session_count))
}
