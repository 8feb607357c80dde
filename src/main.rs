use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ackack::app;
use ackack::cli::Cli;
use ackack::error::AckError;
use ackack::report::Reporter;

fn main() {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.quiet);

    if let Err(err) = init_tracing() {
        reporter.warn(format!("{err:#}"));
    }

    let result = std::env::current_dir()
        .context("failed to determine the current directory")
        .and_then(|start_dir| app::run(&cli, &start_dir, &reporter));

    if let Err(err) = result {
        reporter.error(format!("{err:#}"));
        let code = err.downcast_ref::<AckError>().map_or(1, AckError::exit_code);
        std::process::exit(code);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env("ACKACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
