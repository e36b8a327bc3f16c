//! Variable rate CLI - evaluate one step of the variable interest rate model.
//!
//! Reads thirteen positional scaled integers and writes the new per-second
//! rate and full utilization rate. Logs go to stderr so stdout carries only
//! the result.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::run_rate;

fn init_tracing(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    run_rate(&cli.rate, cli.format)?;

    Ok(())
}
