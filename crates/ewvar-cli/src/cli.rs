//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{InspectArgs, VarArgs};

/// EWVaR - Portfolio Value at Risk from daily price histories
#[derive(Parser)]
#[command(name = "ewvar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate portfolio VaR
    Var(VarArgs),

    /// List the tickers and date ranges in a price file
    Inspect(InspectArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
