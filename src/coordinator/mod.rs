//! Coordinator module
//!
//! Orchestrates a benchmark: the sequential quadrature first, then the
//! parallel quadrature once per configured thread count, in order. Every
//! configuration is timed (optionally after an untimed warmup pass and over
//! several repetitions) and turned into a [`RunRecord`].
//!
//! # Example
//!
//! ```
//! use quadpulse::config::Config;
//! use quadpulse::coordinator::BenchmarkRunner;
//! use std::sync::Arc;
//!
//! let mut config = Config::default();
//! config.domain.lower = 0.5;
//! config.domain.upper = Some(1.5);
//! config.domain.samples = Some(10_000);
//! config.workers.thread_counts = vec![1, 2];
//!
//! let runner = BenchmarkRunner::new(Arc::new(config))?;
//! let report = runner.run()?;
//!
//! assert_eq!(report.records.len(), 3);
//! assert_eq!(report.records[0].label, "sequential");
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::{validator, Config};
use crate::integrand::{CosineKernel, Integrand};
use crate::quadrature::{self, Domain};
use crate::stats::histogram::TimingHistogram;
use crate::stats::{run_label, BenchmarkReport, RunMode, RunRecord};
use crate::util::time::timed;
use crate::Result;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

/// Runs the sequential and parallel configurations of one benchmark
pub struct BenchmarkRunner<I> {
    config: Arc<Config>,
    integrand: I,
    domain: Domain,
}

impl BenchmarkRunner<CosineKernel> {
    /// Create a runner for the default `(cos(t) - 1) / t` integrand
    pub fn new(config: Arc<Config>) -> Result<Self> {
        Self::with_integrand(config, CosineKernel::new())
    }
}

impl<I: Integrand> BenchmarkRunner<I> {
    /// Create a runner for an arbitrary integrand
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate; nothing is computed.
    pub fn with_integrand(config: Arc<Config>, integrand: I) -> Result<Self> {
        validator::validate_config(&config).context("Configuration validation failed")?;
        let domain = config.domain().context("Invalid integration domain")?;

        Ok(Self {
            config,
            integrand,
            domain,
        })
    }

    /// Validated integration domain
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Run every configuration and collect the report
    pub fn run(&self) -> Result<BenchmarkReport> {
        self.run_with(|_| {})
    }

    /// Run every configuration, calling `on_record` as each one completes
    ///
    /// The first failing configuration aborts the benchmark.
    pub fn run_with(&self, mut on_record: impl FnMut(&RunRecord)) -> Result<BenchmarkReport> {
        let workers = &self.config.workers;
        let runtime = &self.config.runtime;

        let mut report = BenchmarkReport::new(
            self.integrand.name(),
            &self.domain,
            runtime.singularity,
            workers.backend,
            workers.repeat,
        );

        log::info!(
            "integrating {} over {} ({} policy)",
            self.integrand.name(),
            self.domain,
            runtime.singularity
        );

        let mut sequential = self.measure(RunMode::Sequential, 1)?;
        let baseline = sequential.elapsed();
        sequential.apply_baseline(baseline);
        on_record(&sequential);
        report.push(sequential);

        for &threads in &workers.thread_counts {
            let mut record = self.measure(RunMode::Parallel, threads)?;
            record.apply_baseline(baseline);
            on_record(&record);
            report.push(record);
        }

        Ok(report)
    }

    /// Time one configuration over all repetitions
    ///
    /// The reported elapsed time is the fastest repetition.
    fn measure(&self, mode: RunMode, threads: usize) -> Result<RunRecord> {
        let label = run_label(mode, threads);
        let workers = &self.config.workers;

        if workers.warmup {
            log::debug!("{}: warmup pass", label);
            self.execute(mode, threads)
                .with_context(|| format!("{} warmup failed", label))?;
        }

        let mut timings = TimingHistogram::new();
        let mut fastest: Option<Duration> = None;
        let mut result = f64::NAN;

        for rep in 0..workers.repeat {
            let (outcome, elapsed) = timed(|| self.execute(mode, threads));
            result = outcome.with_context(|| format!("{} run failed", label))?;
            timings.record(elapsed);
            fastest = Some(fastest.map_or(elapsed, |f| f.min(elapsed)));
            log::debug!("{}: repetition {} -> {} in {:?}", label, rep + 1, result, elapsed);
        }

        let elapsed = fastest.unwrap_or_default();
        log::info!("{}: result {} in {} ms", label, result, elapsed.as_millis());

        Ok(RunRecord::new(mode, threads, result, elapsed, &timings))
    }

    fn execute(&self, mode: RunMode, threads: usize) -> std::result::Result<f64, quadrature::QuadratureError> {
        let policy = self.config.runtime.singularity;
        match mode {
            RunMode::Sequential => {
                quadrature::integrate_sequential_with(&self.integrand, &self.domain, policy)
            }
            RunMode::Parallel => quadrature::integrate_parallel_with(
                &self.integrand,
                &self.domain,
                threads,
                policy,
                self.config.workers.backend,
            ),
        }
    }
}
