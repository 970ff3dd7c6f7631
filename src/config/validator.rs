//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_domain(&config.domain)?;
    validate_workers(&config.workers)?;
    validate_output(&config.output)?;

    if let Some(samples) = config.domain.samples {
        warn_on_thread_counts(&config.workers, samples, num_cpus::get());
    }

    Ok(())
}

/// Validate domain configuration
pub fn validate_domain(domain: &DomainConfig) -> Result<()> {
    if !domain.lower.is_finite() {
        anyhow::bail!("lower bound must be finite, got {}", domain.lower);
    }

    match domain.upper {
        None => anyhow::bail!("upper bound (x) is required"),
        Some(upper) if !upper.is_finite() => {
            anyhow::bail!("upper bound must be finite, got {}", upper)
        }
        Some(_) => {}
    }

    match domain.samples {
        None => anyhow::bail!("sample count (N) is required"),
        Some(0) => anyhow::bail!("sample count (N) must be at least 1"),
        Some(_) => {}
    }

    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if workers.thread_counts.is_empty() {
        anyhow::bail!("at least one thread count is required");
    }

    if let Some(pos) = workers.thread_counts.iter().position(|&t| t == 0) {
        anyhow::bail!("thread count at position {} must be at least 1", pos);
    }

    if workers.repeat == 0 {
        anyhow::bail!("repeat must be at least 1");
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let (Some(json), Some(csv)) = (&output.json_output, &output.csv_output) {
        if json == csv {
            anyhow::bail!("json_output and csv_output must be different files: {}", json.display());
        }
    }

    Ok(())
}

/// Log warnings for thread counts that cannot pay off
///
/// Returns the number of warnings emitted.
fn warn_on_thread_counts(workers: &WorkerConfig, samples: u64, cores: usize) -> usize {
    let mut warnings = 0;

    for &threads in &workers.thread_counts {
        if threads > cores {
            log::warn!(
                "{} threads exceeds the {} available cores; workers will time-share",
                threads,
                cores
            );
            warnings += 1;
        }
        if threads as u64 > samples {
            log::warn!(
                "{} threads exceeds the {} samples; some workers get empty ranges",
                threads,
                samples
            );
            warnings += 1;
        }
    }

    warnings
}
