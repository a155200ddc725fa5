use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Every GET is a view mount: re-read the cache and let the freshness
/// policy decide what the client sees.
pub async fn get_feed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.load().await)
}

/// The explicit "pull today's stories" trigger. No parameters.
pub async fn pull_feed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.pull().await)
}
