//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// QuadPulse - Parallel Riemann-sum integration benchmark
///
/// Integrates (cos(t) - 1) / t over [lower, x] sequentially, then in
/// parallel for each thread count, and reports result and wall time.
#[derive(Parser, Debug, Default)]
#[command(name = "quadpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Domain Options ===
    /// Upper bound of integration (prompted for if omitted)
    #[arg(short = 'x', long = "upper", allow_negative_numbers = true)]
    pub upper: Option<f64>,

    /// Lower bound of integration
    #[arg(long, allow_negative_numbers = true)]
    pub lower: Option<f64>,

    /// Number of samples, accepts k/M/G suffixes (e.g., 1000000, 1M, 500k)
    #[arg(short = 'n', long)]
    pub samples: Option<String>,

    // === Worker Options ===
    /// Comma-separated thread counts to benchmark (default: 1,2,4,8,16,32)
    #[arg(short = 't', long)]
    pub threads: Option<String>,

    /// Worker backend
    #[arg(long, value_enum)]
    pub backend: Option<BackendType>,

    /// Timed repetitions per configuration
    #[arg(short = 'r', long)]
    pub repeat: Option<usize>,

    /// Run one untimed warmup pass per configuration
    #[arg(long)]
    pub warmup: bool,

    // === Numerical Options ===
    /// Handling of non-finite integrand samples (e.g. t = 0)
    #[arg(long, value_enum)]
    pub singularity: Option<SingularityMode>,

    // === Output Options ===
    /// JSON report output path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// CSV report output path
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// Write compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact_json: bool,

    /// Only print per-run results, no summary table
    #[arg(short = 'q', long)]
    pub quiet: bool,

    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long, env = "QUADPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

/// Worker backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendType {
    /// One OS thread per worker, spawned per call
    Threads,
    /// Rayon pool sized to the worker count
    Rayon,
}

/// Singularity handling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SingularityMode {
    /// Add non-finite samples to the sum (NaN poisons the result)
    Propagate,
    /// Fail at the first non-finite sample
    Guard,
    /// Skip non-finite samples
    Exclude,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    ///
    /// Only checks what can be judged from the arguments alone; the merged
    /// configuration is validated by `validator::validate_config`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(repeat) = self.repeat {
            if repeat == 0 {
                anyhow::bail!("repeat must be at least 1");
            }
        }

        if let Some(upper) = self.upper {
            if !upper.is_finite() {
                anyhow::bail!("upper bound must be finite");
            }
        }

        if let Some(lower) = self.lower {
            if !lower.is_finite() {
                anyhow::bail!("lower bound must be finite");
            }
        }

        Ok(())
    }
}
