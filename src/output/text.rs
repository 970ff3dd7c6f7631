//! Human-readable text output

use crate::stats::{BenchmarkReport, RunMode, RunRecord};
use crate::util::time::{format_duration, format_speedup};

/// Format the result lines for a single run
///
/// Two lines per run: the numeric result and the elapsed time in whole
/// milliseconds.
pub fn format_record(record: &RunRecord) -> String {
    let name = match record.mode {
        RunMode::Sequential => "Sequential".to_string(),
        RunMode::Parallel if record.threads == 1 => "Parallel with 1 thread".to_string(),
        RunMode::Parallel => format!("Parallel with {} threads", record.threads),
    };
    format!(
        "{} result: {}\n{} time: {} ms",
        name,
        format_result(record.result),
        name,
        record.elapsed_ms
    )
}

/// Print the result lines for a single run as soon as it completes
pub fn print_record(record: &RunRecord) {
    println!("{}", format_record(record));
}

/// Print the summary table for a completed benchmark
pub fn print_report(report: &BenchmarkReport) {
    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("                    BENCHMARK SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Integrand:   {}", report.integrand);
    println!(
        "Domain:      [{}, {}], N={}, h={:e}",
        report.domain.lower, report.domain.upper, report.domain.samples, report.domain.step
    );
    println!("Singularity: {}", report.policy);
    println!("Backend:     {} (repeat={})", report.backend, report.repeat);
    println!();

    println!(
        "  {:<24} {:>22} {:>10} {:>10} {:>9} {:>8}",
        "Run", "Result", "Time", "Mean", "Speedup", "Eff."
    );
    for record in &report.records {
        println!("{}", format_row(record));
    }
    println!();

    match report.max_abs_deviation() {
        Some(dev) => println!("Max |parallel - sequential|: {:e}", dev),
        None => println!("Max |parallel - sequential|: n/a (non-finite results)"),
    }
    if let Some(fastest) = report.fastest_parallel() {
        println!(
            "Fastest parallel run: {} ({} ms, {})",
            fastest.label,
            fastest.elapsed_ms,
            format_speedup(fastest.speedup)
        );
    }

    println!("═══════════════════════════════════════════════════════════");
}

fn format_row(record: &RunRecord) -> String {
    let mean = record
        .timing
        .map(|t| format_duration(std::time::Duration::from_micros(t.mean_micros)))
        .unwrap_or_else(|| "-".to_string());
    let efficiency = record
        .efficiency
        .map(|e| format!("{:.0}%", e * 100.0))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "  {:<24} {:>22} {:>7} ms {:>10} {:>9} {:>8}",
        record.label,
        format_result(record.result),
        record.elapsed_ms,
        mean,
        format_speedup(record.speedup),
        efficiency
    )
}

/// Format a result with enough digits to expose low-bit differences
fn format_result(value: f64) -> String {
    if value.is_finite() {
        format!("{:.15e}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::histogram::TimingHistogram;
    use std::time::Duration;

    fn record(mode: RunMode, threads: usize, result: f64, ms: u64) -> RunRecord {
        let mut timings = TimingHistogram::new();
        timings.record(Duration::from_millis(ms));
        RunRecord::new(mode, threads, result, Duration::from_millis(ms), &timings)
    }

    #[test]
    fn test_format_record_sequential() {
        let text = format_record(&record(RunMode::Sequential, 1, -0.5, 42));
        assert_eq!(
            text,
            "Sequential result: -5.000000000000000e-1\nSequential time: 42 ms"
        );
    }

    #[test]
    fn test_format_record_parallel() {
        let text = format_record(&record(RunMode::Parallel, 8, f64::NAN, 3));
        assert_eq!(
            text,
            "Parallel with 8 threads result: NaN\nParallel with 8 threads time: 3 ms"
        );

        let text = format_record(&record(RunMode::Parallel, 1, 1.0, 3));
        assert!(text.starts_with("Parallel with 1 thread result:"));
    }

    #[test]
    fn test_format_row_columns() {
        let mut r = record(RunMode::Parallel, 4, 0.25, 10);
        r.apply_baseline(Duration::from_millis(40));
        let row = format_row(&r);
        assert!(row.contains("parallel (4 threads)"));
        assert!(row.contains("10 ms"));
        assert!(row.contains("4.00x"));
        assert!(row.contains("100%"));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(1.0), "1.000000000000000e0");
        assert_eq!(format_result(f64::INFINITY), "inf");
        assert_eq!(format_result(f64::NAN), "NaN");
    }
}
