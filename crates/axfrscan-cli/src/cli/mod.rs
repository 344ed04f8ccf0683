//! CLI argument parsing and scan dispatch.

pub mod args;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use args::Cli;
use axfrscan_core::ManagedFilter;
use axfrscan_recon::{DigClient, ScanObserver, ScanReport, Scanner};
use clap::{CommandFactory, Parser};
use tracing::debug;

use crate::config::Config;
use crate::logging::init_logging;
use crate::output::{OutputFormat, TerminalReporter};
use crate::targets;

/// Run the CLI application.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.debug);

    let raw_targets = match targets::gather(cli.url.as_deref(), cli.file.as_deref()) {
        Ok(targets) => targets,
        Err(e) if e.wants_usage() => {
            eprintln!("error: {e}\n");
            eprintln!("{}", Cli::command().render_help());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli.format.or(config.format).unwrap_or_default();
    let filter = ManagedFilter::new().with_patterns(
        config
            .extra_managed_patterns
            .iter()
            .chain(&cli.skip_patterns),
    );

    let reporter = TerminalReporter::stdout(cli.vuln_only, !cli.no_color);
    if format == OutputFormat::Pretty {
        reporter.banner();
    }

    let dig = match cli.dig.clone().or_else(|| config.dig_path.clone()) {
        Some(path) => DigClient::with_program(path),
        None => DigClient::new(),
    };
    dig.preflight().await.context("Prerequisite check failed")?;
    debug!(dig = %dig.program().display(), "dig is available");

    let scanner = Scanner::new(dig)
        .timeout(Duration::from_secs(config.timeout_secs(cli.timeout)))
        .output_dir(cli.output_dir.clone().or_else(|| config.output_dir.clone()))
        .concurrency(config.concurrency(cli.concurrency))
        .filter(filter);
    debug!(
        config = ?scanner.config(),
        ?format,
        extra_patterns = config.extra_managed_patterns.len() + cli.skip_patterns.len(),
        "effective settings"
    );

    // JSON goes to stdout on its own, so progress lines are dropped.
    let observer: &dyn ScanObserver = match format {
        OutputFormat::Pretty => &reporter,
        OutputFormat::Json => &(),
    };
    let report = scanner.run(&raw_targets, observer).await;

    render(&reporter, &report, format)?;
    Ok(ExitCode::SUCCESS)
}

fn render(
    reporter: &TerminalReporter<std::io::Stdout>,
    report: &ScanReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Pretty => reporter.summary(report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to encode report")?;
            println!("{json}");
        }
    }
    Ok(())
}
