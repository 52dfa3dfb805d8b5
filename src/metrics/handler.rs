//! # Metrics HTTP Handlers
//!
//! Axum handler for the Prometheus scrape endpoint.

use crate::api::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// GET /metrics in Prometheus exposition format.
///
/// History-derived gauges are refreshed on each scrape rather than on
/// each admission, so an idle service still reports current state.
/// Replies 200 with the exposition content type even before any metric
/// has been recorded.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.controller.update_history_gauges();

    let metrics = state.prometheus_handle.render();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics,
    )
}
