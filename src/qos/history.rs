//! Bounded history of backend health readings.
//!
//! Keeps a FIFO ring of the most recent probe samples. The history is the
//! only mutable state shared between admission decisions: every successful
//! probe call appends one sample, and the scaling policy reads the mean of
//! whatever is currently retained.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

/// A single backend-load reading captured by the health probe.
#[derive(Debug, Clone, Copy)]
pub struct HealthSample {
    /// Observed gauge value (e.g. pending commit-log flush tasks).
    pub reading: u64,
    /// When the probe call returned.
    pub observed_at: Instant,
}

impl HealthSample {
    /// Create a sample stamped with the current instant.
    pub fn new(reading: u64) -> Self {
        Self {
            reading,
            observed_at: Instant::now(),
        }
    }
}

/// Fixed-capacity FIFO series of [`HealthSample`]s.
///
/// All access goes through one internal mutex. [`record`](Self::record)
/// appends and returns the post-append mean inside a single critical
/// section, so the average used for a scaling decision always includes
/// that decision's own sample. Eviction is by insertion order; memory is
/// strictly bounded by the capacity chosen at construction.
pub struct HealthHistory {
    samples: Mutex<VecDeque<HealthSample>>,
    capacity: usize,
}

impl HealthHistory {
    /// Default number of retained samples.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Create an empty history holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Configuration validation rejects a
    /// zero capacity before a history is ever constructed.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a reading, evicting the oldest sample if at capacity, and
    /// return the mean of the retained readings including this one.
    pub fn record(&self, reading: u64) -> f64 {
        let mut samples = self.samples.lock().unwrap();
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(HealthSample::new(reading));
        mean(&samples)
    }

    /// Mean of the retained readings, or `None` while the history is empty.
    pub fn average(&self) -> Option<f64> {
        let samples = self.samples.lock().unwrap();
        if samples.is_empty() {
            None
        } else {
            Some(mean(&samples))
        }
    }

    /// Point-in-time copy of the retained samples, oldest first.
    pub fn snapshot(&self) -> Vec<HealthSample> {
        self.samples.lock().unwrap().iter().copied().collect()
    }

    /// The most recently recorded sample, if any.
    pub fn last(&self) -> Option<HealthSample> {
        self.samples.lock().unwrap().back().copied()
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.samples.lock().unwrap().len()
    }

    /// True while no sample has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.lock().unwrap().is_empty()
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HealthHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

fn mean(samples: &VecDeque<HealthSample>) -> f64 {
    let sum: f64 = samples.iter().map(|s| s.reading as f64).sum();
    sum / samples.len() as f64
}
