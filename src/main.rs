//! QuadPulse CLI entry point

use anyhow::{Context, Result};
use chrono::Utc;
use quadpulse::config::{cli::Cli, cli_convert, toml, validator, Config};
use quadpulse::coordinator::BenchmarkRunner;
use quadpulse::output::{csv, json, text};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    // CLI --debug is already merged over the file's [runtime] debug
    let mut config = toml::load_config(&cli)?;
    init_logging(config.runtime.log_level());

    println!("QuadPulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Parallel Riemann-sum integration benchmark");
    println!();

    prompt_missing(&mut config)?;

    validator::validate_config(&config).context("Configuration validation failed")?;
    print!("{}", config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    run(config)
}

/// Initialize env_logger: a forced level wins, otherwise RUST_LOG or info
fn init_logging(level: Option<log::LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis().init();
}

/// Ask for x and N on stdin when neither CLI nor config file set them
fn prompt_missing(config: &mut Config) -> Result<()> {
    if config.domain.upper.is_some() && config.domain.samples.is_some() {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config.domain.upper.is_none() {
        let line = prompt(&mut input, "Enter x: ")?;
        let upper: f64 = line
            .parse()
            .with_context(|| format!("Invalid value for x: {:?}", line))?;
        config.domain.upper = Some(upper);
    }

    if config.domain.samples.is_none() {
        let line = prompt(&mut input, "Enter N: ")?;
        let samples = cli_convert::parse_count(&line).context("Invalid value for N")?;
        config.domain.samples = Some(samples);
    }

    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("unexpected end of input while reading {}", message.trim());
    }
    Ok(line.trim().to_string())
}

fn run(config: Config) -> Result<()> {
    let config = Arc::new(config);
    let runner = BenchmarkRunner::new(Arc::clone(&config))?;

    let start = Utc::now();
    let report = runner.run_with(text::print_record)?;
    let end = Utc::now();

    if !config.output.quiet {
        text::print_report(&report);
    }

    if let Some(ref path) = config.output.json_output {
        let output = json::JsonOutput {
            test_info: json::JsonTestInfo::new(&config, start, end),
            report: report.clone(),
        };
        json::write_json_report(path, &output, config.output.pretty_json)
            .context("Failed to write JSON report")?;
        log::info!("JSON report written to {}", path.display());
    }

    if let Some(ref path) = config.output.csv_output {
        csv::write_csv_report(path, &report).context("Failed to write CSV report")?;
        log::info!("CSV report written to {}", path.display());
    }

    Ok(())
}
