//! # Adaptive Admission Control
//!
//! Answers one question per request: how many operations may this client
//! perform right now? The answer combines two inputs:
//!
//! 1. A per-client base quota from configuration (absent means unbounded).
//! 2. A feedback signal from the backing store's load gauge, averaged
//!    over a bounded sample window.
//!
//! When the current reading sits above the window average the quota is
//! scaled down proportionally; at or below the average the quota passes
//! through untouched. Probe trouble of any kind degrades to the unscaled
//! base quota, so callers always receive a usable limit.

pub mod history;
pub mod policy;

pub use history::{HealthHistory, HealthSample};

use crate::config::{QosMode, TurnstileConfig};
use crate::metrics::MetricsCollector;
use crate::probe::{HealthProbe, ProbeError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Central admission controller.
///
/// Shared across all request handlers behind an `Arc`; every method
/// takes `&self` and is safe to call concurrently.
pub struct QosController {
    config: Arc<TurnstileConfig>,
    probe: Arc<dyn HealthProbe>,
    history: HealthHistory,
    metrics: Arc<MetricsCollector>,
}

impl QosController {
    /// Build a controller from configuration and an already-chosen probe.
    pub fn new(
        config: Arc<TurnstileConfig>,
        probe: Arc<dyn HealthProbe>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        let history = HealthHistory::new(config.qos.history_capacity);
        Self {
            config,
            probe,
            history,
            metrics,
        }
    }

    /// Effective limit for a client right now.
    ///
    /// Never fails: an unavailable or misbehaving health backend means
    /// the client gets its unscaled base quota. The probe's network
    /// round-trip happens before any history lock is taken.
    pub async fn effective_limit(&self, client: &str) -> u64 {
        let base = self.config.clients.base_quota(client);
        let client_label = self.metrics.sanitize_label(client);

        let fetch_started = Instant::now();
        let reading = match self.probe.fetch().await {
            Ok(reading) => reading,
            Err(ProbeError::Unavailable { reason }) => {
                debug!(client, %reason, "health backend unavailable, serving base quota");
                metrics::counter!("turnstile_probe_errors_total", "kind" => "unavailable")
                    .increment(1);
                metrics::counter!(
                    "turnstile_requests_total",
                    "client" => client_label,
                    "outcome" => "probe_unavailable",
                )
                .increment(1);
                return base;
            }
            Err(ProbeError::InvalidReading { detail }) => {
                // Worth an operator's attention: the backend answered,
                // but with something the gauge contract does not allow.
                warn!(client, %detail, "unusable health reading, serving base quota");
                metrics::counter!("turnstile_probe_errors_total", "kind" => "invalid_reading")
                    .increment(1);
                metrics::counter!(
                    "turnstile_requests_total",
                    "client" => client_label,
                    "outcome" => "probe_invalid",
                )
                .increment(1);
                return base;
            }
        };
        metrics::histogram!("turnstile_probe_latency_seconds")
            .record(fetch_started.elapsed().as_secs_f64());

        // The average includes the sample we just took.
        let average = self.history.record(reading);
        let factor = policy::scale_factor(reading, Some(average));
        let scaled = policy::scaled_limit(base, factor);

        metrics::gauge!("turnstile_health_reading").set(reading as f64);
        metrics::gauge!("turnstile_health_average").set(average);
        metrics::histogram!("turnstile_scaled_limit", "client" => client_label.clone())
            .record(scaled as f64);

        debug!(
            client,
            reading, average, factor, base, scaled, "admission decision"
        );

        match self.config.qos.mode {
            QosMode::Enforce => {
                metrics::counter!(
                    "turnstile_requests_total",
                    "client" => client_label,
                    "outcome" => "scaled",
                )
                .increment(1);
                scaled
            }
            QosMode::Observe => {
                metrics::counter!(
                    "turnstile_requests_total",
                    "client" => client_label,
                    "outcome" => "passthrough",
                )
                .increment(1);
                base
            }
        }
    }

    /// The sample window backing this controller's scaling decisions.
    pub fn history(&self) -> &HealthHistory {
        &self.history
    }

    /// Configured enforcement mode.
    pub fn mode(&self) -> QosMode {
        self.config.qos.mode
    }

    /// Whether a health backend is configured (scaling can be active).
    pub fn probe_configured(&self) -> bool {
        self.config.health_backend.is_some()
    }

    /// Refresh history-derived gauges. Called at metrics scrape time so
    /// the exported values stay current even when no requests arrive.
    pub fn update_history_gauges(&self) {
        metrics::gauge!("turnstile_history_len").set(self.history.len() as f64);
        if let Some(average) = self.history.average() {
            metrics::gauge!("turnstile_health_average").set(average);
        }
    }
}
