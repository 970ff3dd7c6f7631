//! Benchmark statistics
//!
//! One [`RunRecord`] is produced per benchmark configuration (the sequential
//! run, then one per thread count). A record carries the numeric result,
//! the elapsed wall-clock time, timing statistics over all repetitions and
//! the speedup relative to the sequential baseline. The records of a whole
//! benchmark are collected in a [`BenchmarkReport`].
//!
//! # Example
//!
//! ```
//! use quadpulse::stats::{RunMode, RunRecord};
//! use quadpulse::stats::histogram::TimingHistogram;
//! use std::time::Duration;
//!
//! let mut timings = TimingHistogram::new();
//! timings.record(Duration::from_millis(40));
//!
//! let mut record = RunRecord::new(RunMode::Parallel, 4, -0.23981, Duration::from_millis(40), &timings);
//! record.apply_baseline(Duration::from_millis(120));
//!
//! assert_eq!(record.label, "parallel (4 threads)");
//! assert_eq!(record.elapsed_ms, 40);
//! assert!((record.speedup.unwrap() - 3.0).abs() < 1e-9);
//! ```

pub mod histogram;

use crate::quadrature::{Domain, SingularityPolicy};
use crate::worker::Backend;
use histogram::{TimingHistogram, TimingSummary};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Execution mode of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Sequential,
    Parallel,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Sequential => write!(f, "sequential"),
            RunMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Label identifying a run in reports
pub fn run_label(mode: RunMode, threads: usize) -> String {
    match mode {
        RunMode::Sequential => "sequential".to_string(),
        RunMode::Parallel if threads == 1 => "parallel (1 thread)".to_string(),
        RunMode::Parallel => format!("parallel ({} threads)", threads),
    }
}

/// Result of one benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub label: String,
    pub mode: RunMode,
    /// Worker count (1 for the sequential run)
    pub threads: usize,
    /// Written as `null` when not finite
    #[serde(deserialize_with = "deserialize_result")]
    pub result: f64,
    /// Elapsed wall-clock time in whole milliseconds
    pub elapsed_ms: u64,
    pub elapsed_micros: u64,
    /// Timing statistics over all repetitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingSummary>,
    /// Sequential elapsed time divided by this run's elapsed time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup: Option<f64>,
    /// Speedup divided by thread count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
}

impl RunRecord {
    /// Build a record from a measured run
    ///
    /// `elapsed` is the reported run time; `timings` holds every repetition.
    pub fn new(
        mode: RunMode,
        threads: usize,
        result: f64,
        elapsed: Duration,
        timings: &TimingHistogram,
    ) -> Self {
        Self {
            label: run_label(mode, threads),
            mode,
            threads,
            result,
            elapsed_ms: elapsed.as_millis() as u64,
            elapsed_micros: elapsed.as_micros() as u64,
            timing: timings.summary(),
            speedup: None,
            efficiency: None,
        }
    }

    /// Reported elapsed time
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_micros)
    }

    /// Compute speedup and efficiency against the sequential baseline
    ///
    /// Leaves both unset when this run took no measurable time.
    pub fn apply_baseline(&mut self, baseline: Duration) {
        let own = self.elapsed().as_secs_f64();
        if own > 0.0 {
            let speedup = baseline.as_secs_f64() / own;
            self.speedup = Some(speedup);
            self.efficiency = Some(speedup / self.threads.max(1) as f64);
        } else {
            self.speedup = None;
            self.efficiency = None;
        }
    }
}

// serde_json writes non-finite floats as null; read null back as NaN
fn deserialize_result<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Domain parameters as reported
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub lower: f64,
    pub upper: f64,
    pub samples: u64,
    pub step: f64,
}

impl From<&Domain> for DomainSummary {
    fn from(domain: &Domain) -> Self {
        Self {
            lower: domain.lower(),
            upper: domain.upper(),
            samples: domain.samples(),
            step: domain.step(),
        }
    }
}

/// All records of one benchmark, in execution order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub integrand: String,
    pub domain: DomainSummary,
    pub policy: SingularityPolicy,
    pub backend: Backend,
    pub repeat: usize,
    pub records: Vec<RunRecord>,
}

impl BenchmarkReport {
    /// Create an empty report
    pub fn new(
        integrand: impl Into<String>,
        domain: &Domain,
        policy: SingularityPolicy,
        backend: Backend,
        repeat: usize,
    ) -> Self {
        Self {
            integrand: integrand.into(),
            domain: DomainSummary::from(domain),
            policy,
            backend,
            repeat,
            records: Vec::new(),
        }
    }

    /// Append a record
    pub fn push(&mut self, record: RunRecord) {
        self.records.push(record);
    }

    /// The sequential baseline record, if it ran
    pub fn sequential(&self) -> Option<&RunRecord> {
        self.records.iter().find(|r| r.mode == RunMode::Sequential)
    }

    /// Parallel records in execution order
    pub fn parallel(&self) -> impl Iterator<Item = &RunRecord> {
        self.records.iter().filter(|r| r.mode == RunMode::Parallel)
    }

    /// Largest absolute difference between a parallel result and the
    /// sequential result
    ///
    /// None without a sequential record, without parallel records, or when
    /// any compared result is not finite.
    pub fn max_abs_deviation(&self) -> Option<f64> {
        let baseline = self.sequential()?.result;
        if !baseline.is_finite() {
            return None;
        }
        let mut max: Option<f64> = None;
        for record in self.parallel() {
            if !record.result.is_finite() {
                return None;
            }
            let dev = (record.result - baseline).abs();
            max = Some(max.map_or(dev, |m| m.max(dev)));
        }
        max
    }

    /// Parallel record with the shortest elapsed time
    pub fn fastest_parallel(&self) -> Option<&RunRecord> {
        self.parallel().min_by_key(|r| r.elapsed_micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mode: RunMode, threads: usize, result: f64, ms: u64) -> RunRecord {
        let mut timings = TimingHistogram::new();
        let elapsed = Duration::from_millis(ms);
        timings.record(elapsed);
        RunRecord::new(mode, threads, result, elapsed, &timings)
    }

    fn report() -> BenchmarkReport {
        let domain = Domain::new(0.0, 1.0, 100).unwrap();
        BenchmarkReport::new("k", &domain, SingularityPolicy::Exclude, Backend::Threads, 1)
    }

    #[test]
    fn test_run_labels() {
        assert_eq!(run_label(RunMode::Sequential, 1), "sequential");
        assert_eq!(run_label(RunMode::Parallel, 1), "parallel (1 thread)");
        assert_eq!(run_label(RunMode::Parallel, 32), "parallel (32 threads)");
    }

    #[test]
    fn test_record_elapsed_whole_millis() {
        let mut timings = TimingHistogram::new();
        let elapsed = Duration::from_micros(12_999);
        timings.record(elapsed);
        let record = RunRecord::new(RunMode::Sequential, 1, 1.0, elapsed, &timings);
        assert_eq!(record.elapsed_ms, 12);
        assert_eq!(record.elapsed_micros, 12_999);
        assert_eq!(record.timing.unwrap().samples, 1);
    }

    #[test]
    fn test_apply_baseline() {
        let mut r = record(RunMode::Parallel, 4, 1.0, 25);
        r.apply_baseline(Duration::from_millis(100));
        assert!((r.speedup.unwrap() - 4.0).abs() < 1e-9);
        assert!((r.efficiency.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_baseline_zero_elapsed() {
        let mut r = record(RunMode::Parallel, 4, 1.0, 0);
        r.apply_baseline(Duration::from_millis(100));
        assert!(r.speedup.is_none());
        assert!(r.efficiency.is_none());
    }

    #[test]
    fn test_report_deviation_and_fastest() {
        let mut report = report();
        assert!(report.max_abs_deviation().is_none());

        report.push(record(RunMode::Sequential, 1, 1.0, 100));
        report.push(record(RunMode::Parallel, 2, 1.0 + 1e-12, 60));
        report.push(record(RunMode::Parallel, 4, 1.0 - 3e-12, 30));

        let dev = report.max_abs_deviation().unwrap();
        assert!((dev - 3e-12).abs() < 1e-15);
        assert_eq!(report.fastest_parallel().unwrap().threads, 4);
        assert_eq!(report.parallel().count(), 2);
        assert_eq!(report.sequential().unwrap().label, "sequential");
    }

    #[test]
    fn test_report_deviation_with_nan() {
        let mut report = report();
        report.push(record(RunMode::Sequential, 1, f64::NAN, 10));
        report.push(record(RunMode::Parallel, 2, f64::NAN, 10));
        assert!(report.max_abs_deviation().is_none());
    }

    #[test]
    fn test_report_with_nan_reads_back() {
        let mut report = report();
        report.push(record(RunMode::Sequential, 1, f64::NAN, 10));
        report.push(record(RunMode::Parallel, 2, -0.125, 5));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"result\":null"));

        let back: BenchmarkReport = serde_json::from_str(&json).unwrap();
        assert!(back.records[0].result.is_nan());
        assert_eq!(back.records[1].result, -0.125);
        assert_eq!(back.records[1].label, "parallel (2 threads)");
        assert_eq!(back.policy, SingularityPolicy::Exclude);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = report();
        report.push(record(RunMode::Sequential, 1, 0.5, 10));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"policy\":\"exclude\""));
        assert!(json.contains("\"backend\":\"threads\""));
        assert!(json.contains("\"label\":\"sequential\""));
    }
}
