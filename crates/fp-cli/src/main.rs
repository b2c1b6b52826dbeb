use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fp_config::FpConfig;
use fp_parser::Target;

mod cli;
mod output;
mod pipeline;

/// Exit status when findings were reported.
const EXIT_FINDINGS: u8 = 3;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("fpcheck error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = FpConfig::load().context("failed to load configuration")?;
    let settings = cli.settings(&config);
    let targets: Vec<Target> = cli.paths.iter().map(|p| Target::parse(p)).collect();
    tracing::debug!(analyzer = fp_checker::ANALYZER_NAME, targets = targets.len(), "starting");

    let mut findings = pipeline::check_targets(&targets, &settings.load)?;
    if settings.sort {
        findings.sort();
    }

    let rendered = output::render(&findings, settings.format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    Ok(if findings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FINDINGS)
    })
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FILEPRIVATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
