//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub probe_configured: bool,
}

/// GET /health - Return service liveness.
///
/// The service is healthy whenever it can answer. A broken health
/// backend degrades quota scaling, not the service itself, so it never
/// shows up here.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        probe_configured: state.controller.probe_configured(),
    })
}
