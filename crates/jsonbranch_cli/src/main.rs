//! jsonbranch CLI
//!
//! Locate and copy branches of JSON documents by key path.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref(), cli.delimiter)?;

    match &cli.command {
        Commands::Locate { input, json } => commands::locate::run_locate(input, config, *json),
        Commands::Copy { input, pretty } => commands::copy::run_copy(input, config, *pretty),
    }
}
