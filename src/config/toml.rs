//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the configuration named by `--config` (or defaults) and apply CLI
/// overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Domain
    if let Some(lower) = cli.lower {
        config.domain.lower = lower;
    }
    if let Some(upper) = cli.upper {
        config.domain.upper = Some(upper);
    }
    if let Some(ref samples) = cli.samples {
        let samples = cli_convert::parse_count(samples).context("Invalid sample count")?;
        config.domain.samples = Some(samples);
    }

    // Workers
    if let Some(ref threads) = cli.threads {
        config.workers.thread_counts =
            cli_convert::parse_thread_list(threads).context("Invalid thread list")?;
    }
    if let Some(backend) = cli.backend {
        config.workers.backend = cli_convert::convert_backend(backend);
    }
    if let Some(repeat) = cli.repeat {
        config.workers.repeat = repeat;
    }
    if cli.warmup {
        config.workers.warmup = true;
    }

    // Output
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if let Some(ref path) = cli.csv_output {
        config.output.csv_output = Some(path.clone());
    }
    if cli.compact_json {
        config.output.pretty_json = false;
    }
    if cli.quiet {
        config.output.quiet = true;
    }

    // Runtime
    if let Some(mode) = cli.singularity {
        config.runtime.singularity = cli_convert::convert_singularity(mode);
    }
    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::{BackendType, SingularityMode};
    use std::io::Write;

    #[test]
    fn test_parse_toml_basic() {
        let toml = r#"
[domain]
upper = 2.5
samples = 1000000

[workers]
thread_counts = [1, 3, 6]
backend = "rayon"
repeat = 5
"#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.domain.lower, 0.0);
        assert_eq!(config.domain.upper, Some(2.5));
        assert_eq!(config.domain.samples, Some(1_000_000));
        assert_eq!(config.workers.thread_counts, vec![1, 3, 6]);
        assert_eq!(config.workers.backend, Backend::Rayon);
        assert_eq!(config.workers.repeat, 5);
        assert!(!config.workers.warmup);
    }

    #[test]
    fn test_parse_toml_empty_uses_defaults() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config.workers.thread_counts, DEFAULT_THREAD_COUNTS.to_vec());
        assert_eq!(config.runtime.singularity, SingularityPolicy::Propagate);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_parse_toml_runtime_and_output() {
        let toml = r#"
[runtime]
singularity = "guard"
debug = true

[output]
json_output = "/tmp/report.json"
pretty_json = false
"#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.runtime.singularity, SingularityPolicy::Guard);
        assert!(config.runtime.debug);
        assert_eq!(config.runtime.log_level(), Some(log::LevelFilter::Debug));
        assert_eq!(config.output.json_output, Some(PathBuf::from("/tmp/report.json")));
        assert!(!config.output.pretty_json);
    }

    #[test]
    fn test_parse_toml_rejects_bad_policy() {
        let toml = r#"
[runtime]
singularity = "ignore"
"#;
        assert!(parse_toml_string(toml).is_err());
    }

    #[test]
    fn test_parse_toml_rejects_negative_samples() {
        let toml = r#"
[domain]
samples = -10
"#;
        assert!(parse_toml_string(toml).is_err());
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let toml = r#"
[domain]
lower = 0.5
upper = 2.0
samples = 1000

[workers]
thread_counts = [1, 2]
"#;
        let config = parse_toml_string(toml).unwrap();

        let cli = Cli {
            upper: Some(4.0),
            samples: Some("10k".to_string()),
            threads: Some("8,16".to_string()),
            backend: Some(BackendType::Rayon),
            singularity: Some(SingularityMode::Exclude),
            compact_json: true,
            ..Default::default()
        };

        let merged = merge_cli_with_config(&cli, config).unwrap();
        assert_eq!(merged.domain.lower, 0.5);
        assert_eq!(merged.domain.upper, Some(4.0));
        assert_eq!(merged.domain.samples, Some(10_000));
        assert_eq!(merged.workers.thread_counts, vec![8, 16]);
        assert_eq!(merged.workers.backend, Backend::Rayon);
        assert_eq!(merged.runtime.singularity, SingularityPolicy::Exclude);
        assert!(!merged.output.pretty_json);
    }

    #[test]
    fn test_merge_keeps_file_values_without_cli() {
        let toml = r#"
[domain]
upper = 3.0
samples = 500
"#;
        let config = parse_toml_string(toml).unwrap();
        let merged = merge_cli_with_config(&Cli::default(), config).unwrap();
        assert_eq!(merged.domain.upper, Some(3.0));
        assert_eq!(merged.domain.samples, Some(500));
        assert_eq!(merged.workers.thread_counts, DEFAULT_THREAD_COUNTS.to_vec());
    }

    #[test]
    fn test_debug_from_file_or_cli() {
        let from_file = parse_toml_string("[runtime]\ndebug = true").unwrap();
        let merged = merge_cli_with_config(&Cli::default(), from_file).unwrap();
        assert_eq!(merged.runtime.log_level(), Some(log::LevelFilter::Debug));

        let cli = Cli {
            debug: true,
            ..Default::default()
        };
        let merged = merge_cli_with_config(&cli, Config::default()).unwrap();
        assert_eq!(merged.runtime.log_level(), Some(log::LevelFilter::Debug));

        let merged = merge_cli_with_config(&Cli::default(), Config::default()).unwrap();
        assert_eq!(merged.runtime.log_level(), None);
    }

    #[test]
    fn test_merge_rejects_bad_samples() {
        let cli = Cli {
            samples: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(merge_cli_with_config(&cli, Config::default()).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[domain]\nupper = 1.0\nsamples = 2000").unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            repeat: Some(2),
            ..Default::default()
        };

        let config = load_config(&cli).unwrap();
        assert_eq!(config.domain.upper, Some(1.0));
        assert_eq!(config.domain.samples, Some(2000));
        assert_eq!(config.workers.repeat, 2);
    }

    #[test]
    fn test_load_config_missing_file() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/quadpulse.toml")),
            ..Default::default()
        };
        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
