//! Per-client quota configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quota served for clients with no configured limit.
pub const UNBOUNDED_QUOTA: u64 = u64::MAX;

/// Per-client base quotas.
///
/// Clients absent from the map are unbounded. That keeps rollout safe:
/// a missing entry can never throttle anyone to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientLimitsConfig {
    /// Client name to base quota, e.g. `{ "billing" = 500 }`
    pub limits: HashMap<String, u64>,
}

impl ClientLimitsConfig {
    /// Base quota for a client, [`UNBOUNDED_QUOTA`] when unconfigured.
    pub fn base_quota(&self, client: &str) -> u64 {
        self.limits.get(client).copied().unwrap_or(UNBOUNDED_QUOTA)
    }
}
