//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! CLI values take precedence over values loaded from a TOML file.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::quadrature::{Domain, QuadratureError, SingularityPolicy};
use crate::worker::Backend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Thread counts benchmarked when none are configured
pub const DEFAULT_THREAD_COUNTS: [usize; 6] = [1, 2, 4, 8, 16, 32];

/// Complete benchmark configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Build the validated integration domain
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the upper bound or sample count is
    /// missing, or if the domain itself is invalid.
    pub fn domain(&self) -> Result<Domain, QuadratureError> {
        let upper = self
            .domain
            .upper
            .ok_or_else(|| QuadratureError::invalid("upper bound (x) is not set"))?;
        let samples = self
            .domain
            .samples
            .ok_or_else(|| QuadratureError::invalid("sample count (N) is not set"))?;
        Domain::new(self.domain.lower, upper, samples)
    }
}

/// Integration domain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Lower bound of integration
    #[serde(default)]
    pub lower: f64,
    /// Upper bound of integration (x)
    pub upper: Option<f64>,
    /// Number of samples (N)
    pub samples: Option<u64>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: None,
            samples: None,
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Thread counts to benchmark, in order
    #[serde(default = "default_thread_counts")]
    pub thread_counts: Vec<usize>,
    /// Worker backend
    #[serde(default)]
    pub backend: Backend,
    /// Timed repetitions per configuration
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Run one untimed pass per configuration first
    #[serde(default)]
    pub warmup: bool,
}

fn default_thread_counts() -> Vec<usize> {
    DEFAULT_THREAD_COUNTS.to_vec()
}

fn default_repeat() -> usize {
    1
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_counts: default_thread_counts(),
            backend: Backend::default(),
            repeat: default_repeat(),
            warmup: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report path
    pub json_output: Option<PathBuf>,
    /// CSV report path
    pub csv_output: Option<PathBuf>,
    /// Pretty-print JSON
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    /// Suppress the text summary table
    #[serde(default)]
    pub quiet: bool,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_output: None,
            csv_output: None,
            pretty_json: default_pretty_json(),
            quiet: false,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Handling of non-finite integrand samples
    #[serde(default)]
    pub singularity: SingularityPolicy,
    /// Validate and print configuration without running
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

impl RuntimeConfig {
    /// Log level forced by the `debug` setting, if any
    ///
    /// None leaves the level to `RUST_LOG` (default `info`).
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.debug {
            Some(log::LevelFilter::Debug)
        } else {
            None
        }
    }
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Domain:  {}", self.domain)?;
        writeln!(f, "  Workers: {}", self.workers)?;
        writeln!(f, "  Output:  {}", self.output)?;
        writeln!(f, "  Runtime: {}", self.runtime)?;
        Ok(())
    }
}

impl fmt::Display for DomainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper = self.upper.map(|u| u.to_string()).unwrap_or_else(|| "?".to_string());
        let samples = self.samples.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
        write!(f, "[{}, {}], N={}", self.lower, upper, samples)
    }
}

impl fmt::Display for WorkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self
            .thread_counts
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "threads=[{}], backend={}, repeat={}", counts, self.backend, self.repeat)?;
        if self.warmup {
            write!(f, ", warmup")?;
        }
        Ok(())
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref path) = self.json_output {
            parts.push(format!("json={}", path.display()));
        }
        if let Some(ref path) = self.csv_output {
            parts.push(format!("csv={}", path.display()));
        }
        if parts.is_empty() {
            write!(f, "text output")
        } else {
            write!(f, "text, {}", parts.join(", "))
        }
    }
}

impl fmt::Display for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "singularity={}", self.singularity)?;
        if self.dry_run {
            write!(f, ", dry_run")?;
        }
        if self.debug {
            write!(f, ", debug")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.domain.lower, 0.0);
        assert!(config.domain.upper.is_none());
        assert_eq!(config.workers.thread_counts, vec![1, 2, 4, 8, 16, 32]);
        assert_eq!(config.workers.repeat, 1);
        assert_eq!(config.workers.backend, Backend::Threads);
        assert_eq!(config.runtime.singularity, SingularityPolicy::Propagate);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_domain_requires_bounds() {
        let mut config = Config::default();
        assert!(config.domain().unwrap_err().is_invalid_argument());

        config.domain.upper = Some(2.0);
        assert!(config.domain().is_err());

        config.domain.samples = Some(100);
        let domain = config.domain().unwrap();
        assert_eq!(domain.upper(), 2.0);
        assert_eq!(domain.samples(), 100);
    }

    #[test]
    fn test_display() {
        let mut config = Config::default();
        config.domain.upper = Some(1.5);
        config.domain.samples = Some(1000);
        config.output.json_output = Some(PathBuf::from("out.json"));

        let text = config.to_string();
        assert!(text.contains("Domain:  [0, 1.5], N=1000"));
        assert!(text.contains("threads=[1,2,4,8,16,32], backend=threads, repeat=1"));
        assert!(text.contains("text, json=out.json"));
        assert!(text.contains("singularity=propagate"));
    }

    #[test]
    fn test_domain_display_unset() {
        let domain = DomainConfig::default();
        assert_eq!(domain.to_string(), "[0, ?], N=?");
    }
}
