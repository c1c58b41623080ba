//! pip-outdated - find outdated Python dependencies
//!
//! Scans requirements.txt, setup.cfg and pyproject.toml (or the given
//! patterns) and reports packages whose installed version lags behind the
//! index.

use clap::Parser;
use pip_outdated::checker::{CheckerConfig, OutdatedChecker};
use pip_outdated::cli::CliArgs;
use pip_outdated::domain::EXIT_FAILURE;
use pip_outdated::environment::{default_interpreter, InstalledPackages, SystemRunner};
use pip_outdated::error::AppError;
use pip_outdated::logging;
use pip_outdated::manifest::{discover, Discovery};
use pip_outdated::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init_logger(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Resolve manifests and build the checker for the discovered requirements
fn prepare(args: &CliArgs) -> Result<(Discovery, OutdatedChecker), AppError> {
    let discovery = discover(&args.patterns, Path::new("."))?;

    // Skip the interpreter query when there is nothing to look up
    let installed = if discovery.requirements.is_empty() {
        InstalledPackages::default()
    } else if !args.site_packages.is_empty() {
        InstalledPackages::scan(&args.site_packages)
    } else {
        let python = args.python.clone().unwrap_or_else(default_interpreter);
        info!("Inspecting environment of {}", python);
        InstalledPackages::from_interpreter(&SystemRunner, &python)
    };

    let config = CheckerConfig {
        index_url: args.index_url.clone(),
        max_connections: args.max_connections,
        timeout: args.timeout,
        show_progress: args.show_progress(),
    };
    let checker = OutdatedChecker::from_config(&config, Arc::new(installed))?;

    Ok((discovery, checker))
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    info!("pip-outdated v{}", env!("CARGO_PKG_VERSION"));

    if args.no_color {
        colored::control::set_override(false);
    }

    let (discovery, checker) = prepare(&args)?;
    let manifest_errors = discovery.errors.len();

    let report = checker
        .run(discovery.requirements)
        .await
        .with_manifest_errors(manifest_errors);

    let formatter = create_formatter(&OutputConfig::from_cli(args.json, args.no_color));

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(report.exit_code(args.quiet)))
}
