//! HTTP implementation of the health probe.

use super::config::HealthBackendConfig;
use super::error::ProbeError;
use super::HealthProbe;
use async_trait::async_trait;
use std::time::Duration;

/// Probe that fetches the configured gauge over HTTP.
///
/// One GET per fetch: `{base_url}/metrics/{type}/{name}/{attribute}`,
/// with tag filters appended as query pairs. The response body must be a
/// bare JSON number holding a non-negative integer; anything else is a
/// contract violation reported as [`ProbeError::InvalidReading`].
pub struct HttpHealthProbe {
    client: reqwest::Client,
    url: String,
    tags: Vec<(String, String)>,
    timeout_seconds: u64,
}

impl HttpHealthProbe {
    /// Build a probe from configuration with a bounded request timeout.
    pub fn new(config: &HealthBackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");
        Self::with_client(config, client)
    }

    /// Build a probe with a custom HTTP client (for testing).
    pub fn with_client(config: &HealthBackendConfig, client: reqwest::Client) -> Self {
        let url = format!(
            "{}/metrics/{}/{}/{}",
            config.base_url.trim_end_matches('/'),
            config.metric_type,
            config.metric_name,
            config.attribute,
        );
        let mut tags: Vec<(String, String)> = config
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        // Deterministic query order regardless of map iteration
        tags.sort();

        Self {
            client,
            url,
            tags,
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// The full gauge URL this probe queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify_error(&self, e: reqwest::Error) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Unavailable {
                reason: format!("request timeout after {}s", self.timeout_seconds),
            }
        } else {
            ProbeError::Unavailable {
                reason: format!("connection failed: {e}"),
            }
        }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn fetch(&self) -> Result<u64, ProbeError> {
        let mut request = self.client.get(&self.url);
        if !self.tags.is_empty() {
            request = request.query(&self.tags);
        }

        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Unavailable {
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|e| self.classify_error(e))?;
        parse_reading(&body)
    }
}

/// Interpret a response body as a non-negative integer gauge.
pub(crate) fn parse_reading(body: &str) -> Result<u64, ProbeError> {
    let value: serde_json::Value =
        serde_json::from_str(body.trim()).map_err(|e| ProbeError::InvalidReading {
            detail: format!("body is not JSON: {e}"),
        })?;

    match &value {
        serde_json::Value::Number(n) => {
            if let Some(reading) = n.as_u64() {
                Ok(reading)
            } else if n.is_i64() {
                Err(ProbeError::InvalidReading {
                    detail: format!("negative reading {n}"),
                })
            } else {
                Err(ProbeError::InvalidReading {
                    detail: format!("non-integer reading {n}"),
                })
            }
        }
        other => Err(ProbeError::InvalidReading {
            detail: format!("expected an integer gauge, got {other}"),
        }),
    }
}
