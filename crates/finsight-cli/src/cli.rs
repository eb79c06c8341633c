//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use finsight_core::OrderBy;

/// Finsight - Analyze personal finance records
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Spending patterns, anomalies, forecast and health score", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis config file (defaults to the user override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input files and ordering shared by every analysis command
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON array of transactions
    #[arg(short, long)]
    pub transactions: PathBuf,

    /// JSON array of goals (none if omitted)
    #[arg(short, long)]
    pub goals: Option<PathBuf>,

    /// Override the configured transaction ordering
    ///
    /// "input" keeps the file order for the pattern trend and the recent
    /// anomaly window; "date" sorts by transaction date first.
    #[arg(long, value_enum)]
    pub order_by: Option<OrderArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full analysis report as JSON
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print a console summary of the analysis
    Report {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Input,
    Date,
}

impl From<OrderArg> for OrderBy {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Input => OrderBy::Input,
            OrderArg::Date => OrderBy::Date,
        }
    }
}
