//! Inspect command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ewvar_ext_file::{CsvPriceHistorySource, HistorySummary};

use crate::cli::OutputFormat;
use crate::output::{print_csv, print_header, print_json, print_table};

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Long-format price file (ticker,date,adjusted_close)
    #[arg(short, long, env = "EWVAR_PRICES")]
    pub prices: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Observations")]
    observations: usize,
    #[tabled(rename = "First")]
    first_date: String,
    #[tabled(rename = "Last")]
    last_date: String,
}

impl From<&HistorySummary> for SummaryRow {
    fn from(summary: &HistorySummary) -> Self {
        let date = |d: Option<ewvar_core::Date>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            ticker: summary.ticker.to_string(),
            observations: summary.observations,
            first_date: date(summary.first_date),
            last_date: date(summary.last_date),
        }
    }
}

/// Execute the inspect command.
pub fn execute(args: InspectArgs, format: OutputFormat) -> Result<()> {
    let source = CsvPriceHistorySource::new(&args.prices)
        .with_context(|| format!("Failed to load {}", args.prices.display()))?;
    let summaries = source.summaries();

    match format {
        OutputFormat::Table => {
            let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
            print_header(&format!("{}", args.prices.display()));
            print_table(&rows);
        }
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Csv => {
            let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => {
            let tickers: Vec<String> = summaries.iter().map(|s| s.ticker.to_string()).collect();
            println!("{}", tickers.join(","));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ewvar_core::{Date, Ticker};

    #[test]
    fn test_summary_row() {
        let summary = HistorySummary {
            ticker: Ticker::from("SPY"),
            observations: 2,
            first_date: Some(Date::from_ymd(2024, 1, 2).unwrap()),
            last_date: None,
        };

        let row = SummaryRow::from(&summary);
        assert_eq!(row.ticker, "SPY");
        assert_eq!(row.first_date, "2024-01-02");
        assert_eq!(row.last_date, "");
    }
}
