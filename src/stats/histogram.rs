//! Run-time histogram using HdrHistogram
//!
//! Records the wall-clock time of every repetition of a benchmark
//! configuration so the report can show min/mean/max and percentiles
//! instead of a single sample.
//!
//! # Example
//!
//! ```
//! use quadpulse::stats::histogram::TimingHistogram;
//! use std::time::Duration;
//!
//! let mut hist = TimingHistogram::new();
//! hist.record(Duration::from_millis(12));
//! hist.record(Duration::from_millis(15));
//!
//! let summary = hist.summary().unwrap();
//! assert_eq!(summary.samples, 2);
//! ```

use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_TRACKABLE_NANOS: u64 = 3_600_000_000_000;

/// Wall-time histogram
///
/// Tracks durations from 1 nanosecond to 1 hour with 3 significant digits
/// (values accurate to within 0.1%).
#[derive(Debug, Clone)]
pub struct TimingHistogram {
    histogram: Histogram<u64>,
}

/// Condensed view of a [`TimingHistogram`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    pub samples: u64,
    pub min_micros: u64,
    pub mean_micros: u64,
    pub max_micros: u64,
    pub p50_micros: u64,
    pub p99_micros: u64,
}

impl TimingHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, MAX_TRACKABLE_NANOS, 3)
            .expect("Failed to create histogram with valid bounds");

        Self { histogram }
    }

    /// Record one run duration
    ///
    /// Values outside 1ns..1h are clamped.
    #[inline]
    pub fn record(&mut self, elapsed: Duration) {
        let nanos = elapsed.as_nanos().min(MAX_TRACKABLE_NANOS as u128) as u64;
        let _ = self.histogram.record(nanos.max(1));
    }

    /// Value at `percentile` (0.0 - 100.0), or None if empty
    pub fn percentile(&self, percentile: f64) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.value_at_percentile(percentile)))
    }

    pub fn min(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.min()))
    }

    pub fn max(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.max()))
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.mean() as u64))
    }

    /// Number of recorded runs
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    /// Summarize the recorded runs, or None if nothing was recorded
    pub fn summary(&self) -> Option<TimingSummary> {
        let micros = |d: Option<Duration>| d.map(|d| d.as_micros() as u64).unwrap_or(0);
        if self.is_empty() {
            return None;
        }
        Some(TimingSummary {
            samples: self.len(),
            min_micros: micros(self.min()),
            mean_micros: micros(self.mean()),
            max_micros: micros(self.max()),
            p50_micros: micros(self.percentile(50.0)),
            p99_micros: micros(self.percentile(99.0)),
        })
    }
}

impl Default for TimingHistogram {
    fn default() -> Self {
        Self::new()
    }
}
