//! Integration tests for the admission HTTP API.
//!
//! These tests drive the router in-process with no health backend
//! configured, so every answer is an unscaled base quota.

mod common;

use axum::http::StatusCode;
use common::{config_with_clients, get, get_json, make_app};
use turnstile::config::QosMode;

#[tokio::test]
async fn test_limit_route_returns_configured_quota() {
    let (mut app, _state) = make_app(config_with_clients(&[("billing", 500)]));

    let (status, body) = get_json(&mut app, "/limit/billing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_u64(), Some(500));
}

#[tokio::test]
async fn test_limit_route_unknown_client_is_unbounded() {
    let (mut app, _state) = make_app(config_with_clients(&[("billing", 500)]));

    let (status, body) = get_json(&mut app, "/limit/stranger").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_u64(), Some(u64::MAX));
}

#[tokio::test]
async fn test_limit_route_client_names_with_separators() {
    let (mut app, _state) = make_app(config_with_clients(&[("team-east:etl", 42)]));

    let (status, body) = get_json(&mut app, "/limit/team-east:etl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_u64(), Some(42));
}

#[tokio::test]
async fn test_qos_status_reports_disabled_probe() {
    let (mut app, _state) = make_app(config_with_clients(&[("billing", 500)]));

    let (status, body) = get_json(&mut app, "/qos/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "enforce");
    assert_eq!(body["probe_configured"], false);
    assert_eq!(body["history"]["len"], 0);
    assert_eq!(body["history"]["capacity"], 100);
    // No samples yet: average and last_sample are omitted entirely
    assert!(body["history"].get("average").is_none());
    assert!(body.get("last_sample").is_none());
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_qos_status_reports_observe_mode() {
    let mut config = config_with_clients(&[]);
    config.qos.mode = QosMode::Observe;
    let (mut app, _state) = make_app(config);

    let (status, body) = get_json(&mut app, "/qos/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "observe");
}

#[tokio::test]
async fn test_health_route() {
    let (mut app, _state) = make_app(config_with_clients(&[]));

    let (status, body) = get_json(&mut app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["probe_configured"], false);
}

#[tokio::test]
async fn test_metrics_route_renders_prometheus_text() {
    let (mut app, _state) = make_app(config_with_clients(&[("billing", 500)]));

    // Generate at least one admission decision first
    let _ = get(&mut app, "/limit/billing").await;

    let (status, body) = get(&mut app, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    // Exposition text is ASCII; an empty render is acceptable when the
    // global recorder was claimed by another test binary's handle.
    assert!(String::from_utf8(body).is_ok());
}

#[tokio::test]
async fn test_router_returns_404_unknown() {
    let (mut app, _state) = make_app(config_with_clients(&[]));

    let (status, _body) = get(&mut app, "/unknown/path").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_limit_requests_without_probe_leave_history_empty() {
    let (mut app, state) = make_app(config_with_clients(&[("billing", 500)]));

    for _ in 0..5 {
        let (status, _) = get(&mut app, "/limit/billing").await;
        assert_eq!(status, StatusCode::OK);
    }

    assert!(state.controller.history().is_empty());
}
