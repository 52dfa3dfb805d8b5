//! Configuration for the remote health-metrics source.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection parameters for the backend health endpoint.
///
/// The probe queries a single scalar gauge identified by metric type,
/// name, and attribute, optionally narrowed by tag filters. The defaults
/// target the write-log backlog gauge of the storage backend, the signal
/// the scaling policy was designed around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthBackendConfig {
    /// Base URL of the metrics endpoint (e.g. `http://sidecar:7171`).
    pub base_url: String,
    /// Metric group to query.
    pub metric_type: String,
    /// Metric name within the group.
    pub metric_name: String,
    /// Gauge attribute to read.
    pub attribute: String,
    /// Optional tag filters, sent as query-string pairs.
    pub tags: HashMap<String, String>,
    /// Timeout for each probe request.
    pub timeout_seconds: u64,
}

impl Default for HealthBackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            metric_type: "CommitLog".to_string(),
            metric_name: "PendingTasks".to_string(),
            attribute: "Value".to_string(),
            tags: HashMap::new(),
            timeout_seconds: 5,
        }
    }
}
