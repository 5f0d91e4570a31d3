//! VaR command implementation.
//!
//! Estimates portfolio VaR from a CSV price file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ewvar_ext_file::CsvPriceHistorySource;
use ewvar_risk::{VarConfig, VarEngine, VarRequest};
use ewvar_risk::var::VarReport;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_tickers, parse_weights};
use crate::output::{
    format_percent, print_csv, print_header, print_json, print_matrix, print_result, print_table,
    KeyValue,
};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Long-format price file (ticker,date,adjusted_close)
    #[arg(short, long, env = "EWVAR_PRICES")]
    pub prices: PathBuf,

    /// Comma-separated tickers, e.g. SPY,TLT,GLD
    #[arg(short, long)]
    pub tickers: String,

    /// Evaluation date (YYYY-MM-DD)
    #[arg(short, long)]
    pub as_of: String,

    /// Comma-separated weights, one per ticker. Defaults to equal weights.
    #[arg(short, long)]
    pub weights: Option<String>,

    /// Confidence level in (0, 1)
    #[arg(short, long)]
    pub confidence: Option<f64>,

    /// Number of daily returns in the estimation window
    #[arg(short, long)]
    pub samples: Option<usize>,

    /// EWMA decay in (0, 1)
    #[arg(short, long)]
    pub lambda: Option<f64>,

    /// Use equal-weight sample statistics instead of EWMA
    #[arg(long)]
    pub sample_correlation: bool,

    /// TOML file with defaults for the estimation parameters
    #[arg(long, env = "EWVAR_CONFIG")]
    pub config: Option<PathBuf>,
}

impl VarArgs {
    /// Configuration file values overridden by explicit flags.
    fn resolve_config(&self) -> Result<VarConfig> {
        let mut config = match &self.config {
            Some(path) => VarConfig::from_file(path)?,
            None => VarConfig::default(),
        };
        if let Some(confidence) = self.confidence {
            config.confidence = confidence;
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(lambda) = self.lambda {
            config.decay_lambda = lambda;
        }
        if self.sample_correlation {
            config.use_ewma = false;
        }
        Ok(config)
    }

    fn request(&self) -> Result<VarRequest> {
        let tickers = parse_tickers(&self.tickers)?;
        let as_of = parse_date(&self.as_of)?;
        let mut request = VarRequest::new(tickers, as_of).with_config(self.resolve_config()?);
        if let Some(weights) = &self.weights {
            request = request.with_weights(parse_weights(weights)?);
        }
        Ok(request)
    }
}

/// Execute the var command.
pub async fn execute(args: VarArgs, format: OutputFormat) -> Result<()> {
    let request = args.request()?;
    request.validate()?;

    let source = CsvPriceHistorySource::new(&args.prices)
        .with_context(|| format!("Failed to load {}", args.prices.display()))?;
    let engine = VarEngine::new(Arc::new(source));
    let report = engine.compute_report(&request).await?;

    match format {
        OutputFormat::Table => print_report(&report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(&asset_rows(&report))?,
        OutputFormat::Minimal => println!("{}", report.var),
    }

    Ok(())
}

/// Per-asset breakdown row.
#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Weight")]
    weight: f64,
    #[tabled(rename = "Volatility", display_with = "percent")]
    volatility: f64,
    #[tabled(rename = "Component VaR", display_with = "percent")]
    component_var: f64,
    #[tabled(rename = "Share", display_with = "percent")]
    share: f64,
}

fn percent(value: &f64) -> String {
    format_percent(*value, 4)
}

fn asset_rows(report: &VarReport) -> Vec<AssetRow> {
    report
        .tickers
        .iter()
        .enumerate()
        .map(|(i, ticker)| {
            let component_var = report.component_var[i];
            AssetRow {
                ticker: ticker.to_string(),
                weight: report.weights[i],
                volatility: report.volatilities[i],
                component_var,
                share: if report.var == 0.0 {
                    0.0
                } else {
                    component_var / report.var
                },
            }
        })
        .collect()
}

fn print_report(report: &VarReport) {
    let mode = report.mode.to_string();
    let summary = vec![
        KeyValue::new("As Of", report.as_of.to_string()),
        KeyValue::new(
            "Window",
            format!("{} to {}", report.window_start, report.window_end),
        ),
        KeyValue::new("Returns", report.sample_count.to_string()),
        KeyValue::from_percent("Confidence", report.confidence),
        KeyValue::new("Estimator", mode),
        KeyValue::new("Quantile Factor", format!("{:.6}", report.quantile_factor)),
        KeyValue::from_percent("Portfolio Volatility", report.portfolio_sigma),
        KeyValue::from_percent("VaR", report.var),
    ];

    print_header("Value at Risk");
    print_table(&summary);

    print_header("Assets");
    print_table(&asset_rows(report));

    if report.tickers.len() > 1 {
        let labels: Vec<String> = report.tickers.iter().map(ToString::to_string).collect();
        print_header("Correlation");
        print_matrix(&labels, &report.correlation.to_rows(), 4);
    }

    println!();
    print_result(
        &format!("VaR ({})", format_percent(report.confidence, 1)),
        &format_percent(report.var, 4),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: Option<PathBuf>) -> VarArgs {
        VarArgs {
            prices: PathBuf::from("prices.csv"),
            tickers: "SPY,TLT".into(),
            as_of: "2024-06-28".into(),
            weights: Some("0.6,0.4".into()),
            confidence: Some(0.95),
            samples: None,
            lambda: None,
            sample_correlation: false,
            config,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "confidence = 0.975\nsample_count = 100").unwrap();

        let config = args(Some(file.path().to_path_buf()))
            .resolve_config()
            .unwrap();
        assert_eq!(config.confidence, 0.95);
        assert_eq!(config.sample_count, 100);
        assert!(config.use_ewma);
    }

    #[test]
    fn test_request_from_args() {
        let mut a = args(None);
        a.sample_correlation = true;
        let request = a.request().unwrap();

        assert_eq!(request.tickers.len(), 2);
        assert_eq!(request.weights, Some(vec![0.6, 0.4]));
        assert!(!request.config.use_ewma);
        assert_eq!(request.config.sample_count, 252);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut a = args(None);
        a.as_of = "June 28".into();
        assert!(a.request().is_err());
    }
}
