//! CLI to Config conversion utilities

use crate::config::cli;
use crate::quadrature::SingularityPolicy;
use crate::worker::Backend;
use anyhow::{Context, Result};

/// Parse a sample count (e.g., "1000", "500k", "1M", "2G") using decimal
/// multipliers
pub fn parse_count(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase().replace('_', "");

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('k') {
        (n, 1_000u64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 1_000_000)
    } else if let Some(n) = s.strip_suffix('g') {
        (n, 1_000_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Count out of range: {}", s))
}

/// Parse a comma-separated list of thread counts (e.g., "1,2,4,8")
pub fn parse_thread_list(s: &str) -> Result<Vec<usize>> {
    let mut counts = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let count: usize = part
            .parse()
            .with_context(|| format!("Invalid thread count: {}", part))?;
        counts.push(count);
    }

    if counts.is_empty() {
        anyhow::bail!("Thread list is empty: '{}'", s);
    }

    Ok(counts)
}

/// Convert CLI BackendType to worker Backend
pub fn convert_backend(cli_type: cli::BackendType) -> Backend {
    match cli_type {
        cli::BackendType::Threads => Backend::Threads,
        cli::BackendType::Rayon => Backend::Rayon,
    }
}

/// Convert CLI SingularityMode to quadrature SingularityPolicy
pub fn convert_singularity(cli_mode: cli::SingularityMode) -> SingularityPolicy {
    match cli_mode {
        cli::SingularityMode::Propagate => SingularityPolicy::Propagate,
        cli::SingularityMode::Guard => SingularityPolicy::Guard,
        cli::SingularityMode::Exclude => SingularityPolicy::Exclude,
    }
}
