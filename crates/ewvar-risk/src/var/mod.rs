//! Value at Risk (VaR) calculations.
//!
//! VaR is reported as a fractional one-day loss at the configured confidence
//! level, from a variance-covariance aggregation scaled by a Student's-t
//! quantile.

mod parametric;

pub use parametric::*;

use ewvar_core::{Date, Ticker};
use serde::{Deserialize, Serialize};

use crate::correlation::{CorrelationMatrix, EstimationMode};

/// Full breakdown of a VaR estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarReport {
    /// Assets, in request order
    pub tickers: Vec<Ticker>,
    /// Weights, index-aligned with `tickers`
    pub weights: Vec<f64>,
    /// Per-asset volatility
    pub volatilities: Vec<f64>,
    /// Asset-by-asset correlation matrix
    pub correlation: CorrelationMatrix,
    /// t quantile at `confidence`
    pub quantile_factor: f64,
    /// Portfolio return standard deviation
    pub portfolio_sigma: f64,
    /// VaR as a fractional loss
    pub var: f64,
    /// Euler allocation of `var` per asset
    pub component_var: Vec<f64>,
    /// Evaluation date
    pub as_of: Date,
    /// First return date of the estimation window
    pub window_start: Date,
    /// Last return date of the estimation window
    pub window_end: Date,
    /// Returns per asset in the window
    pub sample_count: usize,
    /// Confidence level
    pub confidence: f64,
    /// Volatility and correlation estimator
    pub mode: EstimationMode,
}

impl VarReport {
    /// Component VaR of one ticker.
    #[must_use]
    pub fn component_of(&self, ticker: &Ticker) -> Option<f64> {
        self.tickers
            .iter()
            .position(|t| t == ticker)
            .and_then(|i| self.component_var.get(i).copied())
    }
}

impl std::fmt::Display for VarReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.1}%, {} assets, {}): {:.4}%",
            self.confidence * 100.0,
            self.tickers.len(),
            self.mode,
            self.var * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> VarReport {
        VarReport {
            tickers: vec![Ticker::from("SPY"), Ticker::from("TLT")],
            weights: vec![0.5, 0.5],
            volatilities: vec![0.02, 0.02],
            correlation: CorrelationMatrix::identity(2),
            quantile_factor: 2.0,
            portfolio_sigma: 0.014,
            var: 0.028,
            component_var: vec![0.014, 0.014],
            as_of: Date::from_ymd(2024, 6, 28).unwrap(),
            window_start: Date::from_ymd(2024, 6, 21).unwrap(),
            window_end: Date::from_ymd(2024, 6, 28).unwrap(),
            sample_count: 4,
            confidence: 0.95,
            mode: EstimationMode::Ewma { lambda: 0.94 },
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            report().to_string(),
            "VaR(95.0%, 2 assets, EWMA (lambda 0.94)): 2.8000%"
        );
    }

    #[test]
    fn test_component_of() {
        let report = report();
        assert_eq!(report.component_of(&Ticker::from("TLT")), Some(0.014));
        assert_eq!(report.component_of(&Ticker::from("GLD")), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["tickers"][0], "SPY");
        assert_eq!(json["as_of"], "2024-06-28");
        assert_eq!(json["mode"]["mode"], "ewma");
        assert_eq!(json["correlation"][1][1], 1.0);

        let back: VarReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report());
    }
}
