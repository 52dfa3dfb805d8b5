//! Controller introspection endpoint handler.

use crate::api::AppState;
use crate::config::QosMode;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Introspection snapshot of the admission controller.
#[derive(Debug, Serialize)]
pub struct QosStatusResponse {
    pub mode: QosMode,
    pub probe_configured: bool,
    pub history: HistoryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sample: Option<LastSample>,
    pub uptime_seconds: u64,
}

/// Sample window summary.
#[derive(Debug, Serialize)]
pub struct HistoryStatus {
    pub len: usize,
    pub capacity: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

/// Most recent health sample, if any.
#[derive(Debug, Serialize)]
pub struct LastSample {
    pub reading: u64,
    pub age_seconds: u64,
}

/// GET /qos/status - Return controller introspection data.
///
/// Answers the operator questions that matter during a rollout: which
/// mode is active, is anything actually being probed, and how stale is
/// the signal the scaling decisions are based on.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<QosStatusResponse> {
    let controller = &state.controller;
    let history = controller.history();

    let last_sample = history.last().map(|sample| LastSample {
        reading: sample.reading,
        age_seconds: sample.observed_at.elapsed().as_secs(),
    });

    Json(QosStatusResponse {
        mode: controller.mode(),
        probe_configured: controller.probe_configured(),
        history: HistoryStatus {
            len: history.len(),
            capacity: history.capacity(),
            average: history.average(),
        },
        last_sample,
        uptime_seconds: state.metrics_collector.uptime_seconds(),
    })
}
