//! # Admission HTTP API
//!
//! HTTP endpoints for the Turnstile admission controller.
//!
//! ## Endpoints
//!
//! - `GET /limit/{client}` - Effective request limit for a client
//! - `GET /qos/status` - Controller introspection (mode, window, last sample)
//! - `GET /health` - Service liveness
//! - `GET /metrics` - Prometheus exposition text
//!
//! ## Example
//!
//! ```no_run
//! use turnstile::api::{AppState, create_router};
//! use turnstile::config::TurnstileConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(TurnstileConfig::default());
//! let state = Arc::new(AppState::new(config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! `GET /limit/{client}` never returns an error body: health backend
//! trouble is absorbed by the controller, which falls back to the
//! client's unscaled base quota. The only failure modes visible to
//! callers are transport-level (timeout via the router's timeout layer).

mod health;
mod limits;
mod status;

use crate::config::TurnstileConfig;
use crate::metrics::MetricsCollector;
use crate::probe::{self, HealthProbe};
use crate::qos::QosController;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
pub struct AppState {
    pub config: Arc<TurnstileConfig>,
    pub controller: Arc<QosController>,
    /// Instant the service came up; reported as uptime
    pub start_time: Instant,
    /// Label cache and uptime source for the metrics endpoints
    pub metrics_collector: Arc<MetricsCollector>,
    /// Prometheus handle for rendering /metrics
    pub prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    /// Create new application state with the given configuration.
    ///
    /// The probe is chosen from `config.health_backend`; absent means
    /// the disabled probe and inert scaling.
    pub fn new(config: Arc<TurnstileConfig>) -> Self {
        let probe = probe::probe_from_config(config.health_backend.as_ref());
        Self::with_probe(config, probe)
    }

    /// Create application state with an explicit probe.
    ///
    /// Lets tests and the one-shot CLI inject a probe without standing
    /// up a real health backend.
    pub fn with_probe(config: Arc<TurnstileConfig>, probe: Arc<dyn HealthProbe>) -> Self {
        let start_time = Instant::now();

        // The global recorder installs once per process. A second state
        // (tests, one-shot CLI) gets a detached recorder whose handle
        // still renders, it just won't see globally recorded metrics.
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Global metrics recorder taken, using detached handle: {}", e);
            crate::metrics::PrometheusBuilder::new()
                .build_recorder()
                .handle()
        });

        let metrics_collector = Arc::new(MetricsCollector::new(start_time));
        let controller = Arc::new(QosController::new(
            Arc::clone(&config),
            probe,
            Arc::clone(&metrics_collector),
        ));

        Self {
            config,
            controller,
            start_time,
            metrics_collector,
            prometheus_handle,
        }
    }
}

/// Router serving the four endpoints, with timeout and trace layers.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/limit/:client", get(limits::handle))
        .route("/qos/status", get(status::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
