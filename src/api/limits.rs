//! Effective limit endpoint handler.

use crate::api::AppState;
use crate::logging::generate_request_id;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::debug;

/// GET /limit/{client} - Return the effective request limit for a client.
///
/// The body is a bare JSON integer. Unknown clients get the unbounded
/// sentinel; probe trouble degrades to the unscaled base quota. Either
/// way the caller always receives a usable number.
pub async fn handle(State(state): State<Arc<AppState>>, Path(client): Path<String>) -> Json<u64> {
    let request_id = generate_request_id();
    let limit = state.controller.effective_limit(&client).await;
    debug!(request_id, client, limit, "served effective limit");
    Json(limit)
}
