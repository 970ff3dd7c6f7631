//! JSON output formatting
//!
//! Writes the complete benchmark report with test metadata (host, timing,
//! configuration) so runs on different machines can be compared.

use crate::config::Config;
use crate::stats::BenchmarkReport;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Test information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTestInfo {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub num_cpus: usize,
    pub start_time: String,
    pub end_time: String,
    pub duration_ms: u64,
    pub config: Config,
}

impl JsonTestInfo {
    /// Collect test information for a run that spanned `start..end`
    pub fn new(config: &Config, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok());

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            hostname,
            num_cpus: num_cpus::get(),
            start_time: start.to_rfc3339(),
            end_time: end.to_rfc3339(),
            duration_ms: (end - start).num_milliseconds().max(0) as u64,
            config: config.clone(),
        }
    }
}

/// Complete JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub test_info: JsonTestInfo,
    pub report: BenchmarkReport,
}

/// Write JSON output to file
pub fn write_json_report(output_path: &Path, output: &JsonOutput, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(writer, output)?;
    } else {
        serde_json::to_writer(writer, output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::SingularityPolicy;
    use crate::stats::histogram::TimingHistogram;
    use crate::stats::{RunMode, RunRecord};
    use crate::worker::Backend;
    use std::time::Duration;

    fn sample_output() -> JsonOutput {
        let mut config = Config::default();
        config.domain.upper = Some(1.0);
        config.domain.samples = Some(100);

        let domain = config.domain().unwrap();
        let mut report = BenchmarkReport::new("k", &domain, SingularityPolicy::Propagate, Backend::Threads, 1);
        let mut timings = TimingHistogram::new();
        timings.record(Duration::from_millis(5));
        report.push(RunRecord::new(RunMode::Sequential, 1, f64::NAN, Duration::from_millis(5), &timings));
        report.push(RunRecord::new(RunMode::Parallel, 2, -0.25, Duration::from_millis(3), &timings));

        let start = Utc::now();
        let end = start + chrono::Duration::milliseconds(8);
        JsonOutput {
            test_info: JsonTestInfo::new(&config, start, end),
            report,
        }
    }

    #[test]
    fn test_test_info() {
        let output = sample_output();
        assert_eq!(output.test_info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(output.test_info.duration_ms, 8);
        assert!(output.test_info.num_cpus >= 1);
    }

    #[test]
    fn test_write_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json_report(&path, &sample_output(), true).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let records = value["report"]["records"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        // NaN has no JSON representation
        assert!(records[0]["result"].is_null());
        assert_eq!(records[1]["result"].as_f64(), Some(-0.25));
        assert_eq!(records[1]["label"], "parallel (2 threads)");
        assert_eq!(value["test_info"]["config"]["domain"]["samples"], 100);
    }

    #[test]
    fn test_json_report_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json_report(&path, &sample_output(), true).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: JsonOutput = serde_json::from_str(&text).unwrap();
        assert!(back.report.records[0].result.is_nan());
        assert_eq!(back.report.records[1].result, -0.25);
        assert_eq!(back.test_info.config.domain.samples, Some(100));
        assert_eq!(back.test_info.duration_ms, 8);
    }

    #[test]
    fn test_write_json_compact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json_report(&path, &sample_output(), false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_write_json_bad_path() {
        let path = Path::new("/nonexistent-dir/report.json");
        assert!(write_json_report(path, &sample_output(), true).is_err());
    }
}
