use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::toggles::{Toggle, ToggleSnapshot};

pub async fn list_toggles(State(state): State<AppState>) -> Json<ToggleSnapshot> {
    Json(state.toggles.snapshot())
}

pub async fn flip_toggle(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let toggle = Toggle::from_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("unknown toggle '{name}'")))?;
    let enabled = state.toggles.flip(toggle);
    tracing::info!(toggle = toggle.name(), enabled, "toggle flipped over http");
    Ok(Json(json!({
        "name": toggle.name(),
        "enabled": enabled
    })))
}
