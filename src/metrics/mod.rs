//! # Metrics Collection Module
//!
//! Provides admission metrics tracking and Prometheus export.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `turnstile_requests_total{client, outcome}` - Limit requests by outcome
//! - `turnstile_probe_errors_total{kind}` - Probe failures by classification
//!
//! **Histograms:**
//! - `turnstile_scaled_limit{client}` - Scaled limits handed out per client
//! - `turnstile_probe_latency_seconds` - Health probe round-trip time
//!
//! **Gauges:**
//! - `turnstile_health_reading` - Most recent backend load reading
//! - `turnstile_health_average` - Running average over the sample window
//! - `turnstile_history_len` - Samples currently retained

pub mod handler;

// Re-exported so AppState can build a fallback recorder when the
// global one is already installed
pub use metrics_exporter_prometheus::PrometheusBuilder;

use dashmap::DashMap;
use std::time::Instant;

/// Central coordinator for metrics collection.
///
/// Deliberately does not own the Prometheus handle: recording goes
/// through the global `metrics` recorder, so components holding a
/// collector can be unit-tested without installing one. Rendering lives
/// with the HTTP state that owns the handle.
pub struct MetricsCollector {
    /// Service startup time for uptime calculation
    start_time: Instant,
    /// Cached sanitizations, keyed by the raw client name
    label_cache: DashMap<String, String>,
}

impl MetricsCollector {
    /// Create a new MetricsCollector.
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            label_cache: DashMap::new(),
        }
    }

    /// Copy of `label` safe for Prometheus exposition
    /// (`[a-zA-Z_][a-zA-Z0-9_]*`).
    ///
    /// Client names arrive as arbitrary URL path segments, so anything
    /// outside the allowed set becomes an underscore. Results are cached;
    /// client sets are small and stable.
    pub fn sanitize_label(&self, label: &str) -> String {
        if let Some(cached) = self.label_cache.get(label) {
            return cached.clone();
        }

        let mut sanitized: String = label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();

        // A leading digit is the one invalid case substitution cannot fix
        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized.insert(0, '_');
        }

        self.label_cache
            .insert(label.to_string(), sanitized.clone());
        sanitized
    }

    /// Get uptime in seconds since service startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

/// Initialize Prometheus metrics exporter with custom histogram buckets.
///
/// Probe latency buckets span 1ms to 5s (the probe timeout ceiling);
/// scaled-limit buckets span the quota magnitudes clients are configured
/// with, so throttling depth is visible at a glance.
///
/// The returned handle renders the exposition text for GET /metrics.
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

    let limit_buckets = &[
        1.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 50000.0, 100000.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("turnstile_probe_latency_seconds".to_string()),
            latency_buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("turnstile_scaled_limit".to_string()),
            limit_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_starts_near_zero() {
        let collector = MetricsCollector::new(Instant::now());
        assert_eq!(collector.uptime_seconds(), 0);
    }

    #[test]
    fn test_sanitize_keeps_valid_names() {
        let collector = MetricsCollector::default();

        assert_eq!(collector.sanitize_label("valid_name"), "valid_name");
        assert_eq!(collector.sanitize_label("ValidName123"), "ValidName123");
        assert_eq!(collector.sanitize_label("_underscore"), "_underscore");
    }

    #[test]
    fn test_sanitize_rewrites_separators() {
        let collector = MetricsCollector::default();

        assert_eq!(
            collector.sanitize_label("billing-service:primary"),
            "billing_service_primary"
        );
        assert_eq!(collector.sanitize_label("etl/nightly"), "etl_nightly");
        assert_eq!(collector.sanitize_label("team@east"), "team_east");
    }

    #[test]
    fn test_sanitize_prefixes_leading_digit() {
        let collector = MetricsCollector::default();

        assert_eq!(collector.sanitize_label("3rd-party"), "_3rd_party");
        assert_eq!(collector.sanitize_label("7up"), "_7up");
    }

    #[test]
    fn test_sanitize_rewrites_non_ascii() {
        let collector = MetricsCollector::default();

        assert_eq!(collector.sanitize_label("café"), "caf_");
    }

    #[test]
    fn test_sanitize_serves_cached_value() {
        let collector = MetricsCollector::default();

        let first = collector.sanitize_label("client-name");
        let second = collector.sanitize_label("client-name");

        assert_eq!(first, second);
        assert_eq!(first, "client_name");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any client name, including unicode, sanitizes to a
            /// scrape-safe label.
            #[test]
            fn prop_sanitized_is_scrape_safe(input in ".{1,50}") {
                let collector = MetricsCollector::default();

                let sanitized = collector.sanitize_label(&input);

                prop_assert!(!sanitized.is_empty(), "sanitized label is empty");

                let first = sanitized.chars().next().unwrap();
                prop_assert!(
                    first.is_ascii_alphabetic() || first == '_',
                    "bad first char '{}'",
                    first
                );

                for c in sanitized.chars() {
                    prop_assert!(
                        c.is_ascii_alphanumeric() || c == '_',
                        "char '{}' not allowed in a label",
                        c
                    );
                }
            }

            /// Sanitizing twice gives the same label as sanitizing once.
            #[test]
            fn prop_sanitize_stable_under_repeat(input in "[a-zA-Z0-9_:\\-\\./@]{1,30}") {
                let collector = MetricsCollector::default();

                let once = collector.sanitize_label(&input);
                let twice = collector.sanitize_label(&once);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
