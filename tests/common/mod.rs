//! Shared test utilities for Turnstile integration tests.
//!
//! Provides reusable helpers for building configurations, application
//! state, and issuing in-process requests against the router.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::Service;
use turnstile::api::{create_router, AppState};
use turnstile::config::{HealthBackendConfig, TurnstileConfig};

/// The gauge path probed by tests using the default metric coordinates.
pub const GAUGE_PATH: &str = "/metrics/CommitLog/PendingTasks/Value";

/// Config with the given client quotas and no health backend.
pub fn config_with_clients(limits: &[(&str, u64)]) -> TurnstileConfig {
    let mut config = TurnstileConfig::default();
    for (client, limit) in limits {
        config.clients.limits.insert(client.to_string(), *limit);
    }
    config
}

/// Config whose probe points at the given base URL (usually a mock server).
pub fn config_with_backend(limits: &[(&str, u64)], base_url: &str) -> TurnstileConfig {
    let mut config = config_with_clients(limits);
    config.health_backend = Some(HealthBackendConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 1,
        ..Default::default()
    });
    config
}

/// Build the router plus its state for direct inspection.
pub fn make_app(config: TurnstileConfig) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Arc::new(config)));
    let router = create_router(Arc::clone(&state));
    (router, state)
}

/// Issue an in-process GET and return status plus raw body.
pub async fn get(app: &mut axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.call(request).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

/// Issue an in-process GET and parse the body as JSON.
pub async fn get_json(app: &mut axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    let value = serde_json::from_slice(&body).expect("response body should be JSON");
    (status, value)
}
