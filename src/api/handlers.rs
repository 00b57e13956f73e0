//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use super::responses::{ApiResponse, HealthResponse, MetricsResponse, StatusResponse};
use crate::state::AppState;

/// Handle GET /status - Return the countdown state and its formatting
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::from_state(
        state.engine.snapshot(),
        state.get_uptime(),
    ))
}

/// Handle POST /refresh - Start a refresh without waiting for it
pub async fn refresh_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Refresh endpoint called");
    let (snapshot, _) = state.engine.spawn_refresh();
    (StatusCode::ACCEPTED, Json(ApiResponse::refreshing(snapshot)))
}

/// Handle GET /metrics - Recorded operation timings
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    let metrics = state.engine.tracker().metrics();
    Json(MetricsResponse {
        count: metrics.len(),
        metrics,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
