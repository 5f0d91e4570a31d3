//! EWVaR CLI - Command-line interface for portfolio Value at Risk.
//!
//! # Usage
//!
//! ```bash
//! # 99% one-day VaR of an equal-weight portfolio
//! ewvar var --prices prices.csv --tickers SPY,TLT,GLD --as-of 2024-06-28
//!
//! # Explicit weights, 95% confidence, sample correlation
//! ewvar var --prices prices.csv --tickers SPY,TLT --as-of 2024-06-28 \
//!     --weights 0.6,0.4 --confidence 0.95 --sample-correlation
//!
//! # List what a price file contains
//! ewvar inspect --prices prices.csv
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `warn,ewvar=info`).

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "warn,ewvar=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Var(args) => commands::var::execute(args, format).await?,
        Commands::Inspect(args) => commands::inspect::execute(args, format)?,
    }

    Ok(())
}
