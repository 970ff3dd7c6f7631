//! CSV output formatting
//!
//! One row per run, in execution order, for analysis in spreadsheets or
//! pandas. Rows can be appended as runs complete.

use crate::stats::{BenchmarkReport, RunRecord};
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: &str =
    "label,mode,threads,result,elapsed_ms,elapsed_micros,mean_micros,p99_micros,speedup,efficiency";

/// CSV writer for run records
pub struct CsvWriter<W: Write> {
    out: W,
}

impl CsvWriter<BufWriter<File>> {
    /// Create the file and write the header row
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV output: {}", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap a writer and write the header row
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{}", HEADER)?;
        Ok(Self { out })
    }

    /// Append one run
    pub fn append_record(&mut self, record: &RunRecord) -> Result<()> {
        let (mean, p99) = match record.timing {
            Some(t) => (t.mean_micros.to_string(), t.p99_micros.to_string()),
            None => (String::new(), String::new()),
        };

        writeln!(
            self.out,
            "{},{},{},{},{},{},{},{},{},{}",
            quote(&record.label),
            record.mode,
            record.threads,
            record.result,
            record.elapsed_ms,
            record.elapsed_micros,
            mean,
            p99,
            optional(record.speedup),
            optional(record.efficiency),
        )?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write every record of a report to a new CSV file
pub fn write_csv_report(path: &Path, report: &BenchmarkReport) -> Result<()> {
    let mut writer = CsvWriter::create(path)?;
    for record in &report.records {
        writer.append_record(record)?;
    }
    writer.finish()?;
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

// Labels contain spaces and parentheses but never commas or quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field)
}
