//! VaR entry point: fetch, align, estimate, aggregate.
//!
//! [`VarEngine`] owns the only I/O, pulling one history per ticker through a
//! [`PriceHistoryFetcher`]. Everything after the fetch happens in
//! [`estimate_var`], a pure function over the fetched histories.

use std::sync::Arc;

use tracing::{debug, info};

use ewvar_core::{Date, PriceHistory, Ticker, TickerSet};
use ewvar_traits::PriceHistoryFetcher;

use crate::config::VarConfig;
use crate::correlation::{build_correlation_matrix, volatilities, EstimationMode};
use crate::error::{RiskError, RiskResult};
use crate::returns::{align_returns, dated_log_returns};
use crate::var::{parametric_var, VarReport};

/// One VaR computation.
#[derive(Debug, Clone, PartialEq)]
pub struct VarRequest {
    /// Portfolio assets, in order
    pub tickers: TickerSet,
    /// Evaluation date; later prices are ignored
    pub as_of: Date,
    /// Weights per ticker; uniform `1/N` when absent
    pub weights: Option<Vec<f64>>,
    /// Estimation parameters
    pub config: VarConfig,
}

impl VarRequest {
    /// Request with uniform weights and the default configuration.
    #[must_use]
    pub fn new(tickers: TickerSet, as_of: Date) -> Self {
        Self {
            tickers,
            as_of,
            weights: None,
            config: VarConfig::default(),
        }
    }

    /// Sets explicit weights.
    #[must_use]
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: VarConfig) -> Self {
        self.config = config;
        self
    }

    /// Weights to aggregate with. Supplied weights are used as given.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the number of weights differs from the number of tickers.
    pub fn resolved_weights(&self) -> RiskResult<Vec<f64>> {
        let n = self.tickers.len();
        match &self.weights {
            Some(weights) if weights.len() != n => Err(RiskError::invalid_input(format!(
                "{} weights for {n} tickers",
                weights.len()
            ))),
            Some(weights) => Ok(weights.clone()),
            None => Ok(vec![1.0 / n as f64; n]),
        }
    }

    /// Validates the request without fetching anything.
    ///
    /// # Errors
    ///
    /// See [`VarConfig::validate`] and [`resolved_weights`](Self::resolved_weights).
    pub fn validate(&self) -> RiskResult<()> {
        self.config.validate()?;
        self.resolved_weights().map(|_| ())
    }
}

/// Computes VaR for requests against one price source.
#[derive(Clone)]
pub struct VarEngine {
    source: Arc<dyn PriceHistoryFetcher>,
}

impl VarEngine {
    /// Creates an engine over a price source.
    pub fn new(source: Arc<dyn PriceHistoryFetcher>) -> Self {
        Self { source }
    }

    /// VaR of the request as a fractional loss.
    ///
    /// # Errors
    ///
    /// See [`compute_report`](Self::compute_report).
    pub async fn compute_var(&self, request: &VarRequest) -> RiskResult<f64> {
        Ok(self.compute_report(request).await?.var)
    }

    /// VaR of the request with its full breakdown.
    ///
    /// Tickers are fetched in request order and the first failure aborts the
    /// computation; no VaR is ever reported for part of the portfolio.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a malformed request, including a sample count whose
    ///   fetch window leaves the calendar
    /// - `DataUnavailable` naming the ticker whose history is missing or short
    /// - `NumericalDegenerate` when the estimate is undefined
    pub async fn compute_report(&self, request: &VarRequest) -> RiskResult<VarReport> {
        request.validate()?;
        let weights = request.resolved_weights()?;
        let (start, end) = request.config.fetch_window(request.as_of)?;

        info!(
            tickers = %request.tickers,
            as_of = %request.as_of,
            "Computing VaR over {} assets",
            request.tickers.len()
        );

        let mut histories = Vec::with_capacity(request.tickers.len());
        for ticker in &request.tickers {
            histories.push(self.fetch(ticker, start, end).await?);
        }

        let report = estimate_var(&histories, &weights, request.as_of, &request.config)?;
        info!(
            tickers = %request.tickers,
            as_of = %request.as_of,
            var = report.var,
            "VaR({:.1}%) = {:.6}",
            report.confidence * 100.0,
            report.var
        );
        Ok(report)
    }

    async fn fetch(&self, ticker: &Ticker, start: Date, end: Date) -> RiskResult<PriceHistory> {
        debug!(ticker = %ticker, %start, %end, "Fetching price history");

        let history = self
            .source
            .fetch_history(ticker, start, end)
            .await
            .map_err(|e| RiskError::data_unavailable(ticker, e.to_string()))?;

        debug!(ticker = %ticker, observations = history.len(), "Fetched price history");
        Ok(history)
    }
}

/// Estimates VaR from already-fetched histories.
///
/// `histories` and `weights` are index-aligned. Prices dated after `as_of` are
/// dropped, returns are intersected on their common dates and the last
/// `config.sample_count` of them form the estimation window.
///
/// # Errors
///
/// - `InvalidInput` for an invalid config, no histories, duplicate tickers or
///   mismatched weights
/// - `DataUnavailable` naming the first ticker, in input order, with a malformed
///   history or fewer than `sample_count + 1` prices, or the shortest asset when
///   too few dates are common to all
/// - `NumericalDegenerate` when the quantile or variance is undefined
pub fn estimate_var(
    histories: &[PriceHistory],
    weights: &[f64],
    as_of: Date,
    config: &VarConfig,
) -> RiskResult<VarReport> {
    config.validate()?;
    let tickers = TickerSet::new(histories.iter().map(PriceHistory::ticker))?;
    if weights.len() != tickers.len() {
        return Err(RiskError::invalid_input(format!(
            "{} weights for {} tickers",
            weights.len(),
            tickers.len()
        )));
    }

    let sample_count = config.sample_count;
    let mut dated = Vec::with_capacity(histories.len());
    for history in histories {
        let history = history.up_to(as_of);
        let returns = dated_log_returns(&history)?;
        if returns.len() < sample_count {
            return Err(RiskError::data_unavailable(
                history.ticker(),
                format!(
                    "{} prices on or before {as_of}, need {}",
                    history.len(),
                    sample_count.saturating_add(1)
                ),
            ));
        }
        dated.push((history.ticker().clone(), returns));
    }

    let aligned = align_returns(&dated, sample_count)?;
    let (window_start, window_end) = aligned
        .first_date()
        .zip(aligned.last_date())
        .ok_or_else(|| RiskError::invalid_input("empty estimation window"))?;
    debug!(
        observations = aligned.len(),
        %window_start,
        %window_end,
        "Aligned returns"
    );

    let mode = EstimationMode::from_config(config);
    let vols = volatilities(aligned.series(), mode)?;
    let correlation = build_correlation_matrix(aligned.tickers(), aligned.series(), &vols, mode)?;
    let result = parametric_var(weights, &vols, &correlation, config.confidence, sample_count)?;

    Ok(VarReport {
        tickers: aligned.tickers().to_vec(),
        weights: weights.to_vec(),
        volatilities: vols,
        correlation,
        quantile_factor: result.quantile_factor,
        portfolio_sigma: result.portfolio_sigma,
        var: result.var,
        component_var: result.component_var,
        as_of,
        window_start,
        window_end,
        sample_count,
        confidence: config.confidence,
        mode,
    })
}
