//! Admission control configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the controller answers once the scaled limit is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QosMode {
    /// Return the scaled limit to callers.
    #[default]
    Enforce,
    /// Record the scaled limit in metrics but return the base quota.
    /// Staged-rollout mode: observability without behavioral change.
    Observe,
}

impl FromStr for QosMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enforce" => Ok(QosMode::Enforce),
            "observe" => Ok(QosMode::Observe),
            _ => Err(format!("Invalid qos mode: {}", s)),
        }
    }
}

/// Admission control behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QosConfig {
    /// Health samples retained for the running average
    pub history_capacity: usize,
    /// Enforcement mode for scaled limits
    pub mode: QosMode,
}

impl Default for QosConfig {
    fn default() -> Self {
        Self {
            history_capacity: crate::qos::history::HealthHistory::DEFAULT_CAPACITY,
            mode: QosMode::Enforce,
        }
    }
}
