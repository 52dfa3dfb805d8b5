//! Scaling policy for admission control.
//!
//! Reactive damping: a quota is only reduced when the latest reading rises
//! above the recent historical average, and the reduction is proportional
//! to the relative overshoot. A backend that is merely busy, but no busier
//! than its recent trend, is not throttled.

/// Compute the scale factor for the latest reading against the history
/// average (taken after the reading was recorded).
///
/// Returns a value in `[0.0, 1.0]`:
/// - `1.0` when there is no average yet, when the backend is idle
///   (`current == 0`), or when load sits at or below its recent trend;
/// - `1.0 - (current - average) / current` when the reading overshoots
///   the trend, approaching `0.0` as the overshoot grows.
pub fn scale_factor(current: u64, average: Option<f64>) -> f64 {
    let Some(average) = average else {
        return 1.0;
    };
    if current == 0 {
        return 1.0;
    }
    let current = current as f64;
    if average >= current {
        return 1.0;
    }
    (1.0 - (current - average) / current).clamp(0.0, 1.0)
}

/// Apply a scale factor to a base quota, rounding to the nearest integer
/// and flooring at zero.
///
/// A factor of `1.0` short-circuits so the base passes through exactly,
/// with no float round trip; in particular the unbounded sentinel
/// (`u64::MAX`) survives an unthrottled call unchanged.
pub fn scaled_limit(base: u64, factor: f64) -> u64 {
    if factor >= 1.0 {
        return base;
    }
    (base as f64 * factor).round() as u64
}
