//! Finsight CLI - Personal finance analysis
//!
//! Usage:
//!   finsight analyze -t transactions.json -g goals.json --pretty
//!   finsight report -t transactions.json --order-by date

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Analyze { input, pretty } => {
            commands::cmd_analyze(cli.config.as_deref(), &input, pretty)
        }
        Commands::Report { input } => commands::cmd_report(cli.config.as_deref(), &input),
    }
}
