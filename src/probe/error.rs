//! Error types for the health probe.

use thiserror::Error;

/// Failure modes of a probe fetch.
///
/// Both variants are recovered inside the controller (the caller falls
/// back to the unscaled base quota); they differ in what they tell an
/// operator. `Unavailable` is an expected transient condition, while
/// `InvalidReading` means the remote endpoint violated the gauge contract
/// and likely points at a misconfigured metric.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// No health backend is configured, or the remote call failed
    /// (connection error, timeout, non-success HTTP status).
    #[error("health backend unavailable: {reason}")]
    Unavailable { reason: String },

    /// The backend answered, but the payload cannot be interpreted as a
    /// non-negative integer gauge.
    #[error("invalid health reading: {detail}")]
    InvalidReading { detail: String },
}
