//! Health probes for the backing store.
//!
//! A probe answers one question per call: what is the current value of the
//! load gauge the admission controller watches? Deployments without a
//! health backend get a [`DisabledHealthProbe`] so the controller never has
//! to branch on "is probing configured".

pub mod config;
pub mod error;
pub mod http;

pub use config::HealthBackendConfig;
pub use error::ProbeError;
pub use http::HttpHealthProbe;

use async_trait::async_trait;
use std::sync::Arc;

/// One-shot reader for the backing store's load gauge.
#[async_trait]
pub trait HealthProbe: Send + Sync + 'static {
    /// Fetch the current gauge value.
    ///
    /// Errors are advisory: callers are expected to fall back to
    /// unscaled quotas rather than propagate them.
    async fn fetch(&self) -> Result<u64, ProbeError>;
}

/// Probe used when no health backend is configured.
///
/// Every fetch reports the backend as unavailable, which callers treat
/// as "serve the unscaled quota".
pub struct DisabledHealthProbe;

#[async_trait]
impl HealthProbe for DisabledHealthProbe {
    async fn fetch(&self) -> Result<u64, ProbeError> {
        Err(ProbeError::Unavailable {
            reason: "health backend not configured".to_string(),
        })
    }
}

/// Build the probe matching the optional backend configuration.
pub fn probe_from_config(config: Option<&HealthBackendConfig>) -> Arc<dyn HealthProbe> {
    match config {
        Some(backend) => Arc::new(HttpHealthProbe::new(backend)),
        None => Arc::new(DisabledHealthProbe),
    }
}
