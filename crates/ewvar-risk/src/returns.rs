//! Log returns and cross-asset date alignment.
//!
//! Each asset's returns are built independently as `(date, return)` pairs and
//! only then intersected on their common dates, so the result never depends on
//! the order in which histories arrived.

use std::collections::{BTreeMap, BTreeSet};

use ewvar_core::{Date, PriceHistory, Ticker};

use crate::error::{RiskError, RiskResult};

/// Log returns of the last `sample_count + 1` prices of a history.
///
/// The history must already be restricted to the evaluation date. No date
/// alignment happens here; see [`align_returns`] for the portfolio path.
///
/// # Errors
///
/// `DataUnavailable` naming the ticker if the history is malformed or holds
/// fewer than `sample_count + 1` prices.
pub fn log_returns(history: &PriceHistory, sample_count: usize) -> RiskResult<Vec<f64>> {
    history.validate()?;

    if history.len() <= sample_count {
        return Err(RiskError::data_unavailable(
            history.ticker(),
            format!(
                "{} prices available, need {}",
                history.len(),
                sample_count.saturating_add(1)
            ),
        ));
    }

    let prices = history.prices();
    let window = &prices[prices.len() - sample_count - 1..];
    Ok(window.windows(2).map(|pair| (pair[1] / pair[0]).ln()).collect())
}

/// Every log return of a history, dated by the later of its two prices.
///
/// # Errors
///
/// `DataUnavailable` naming the ticker for an unordered history or a
/// non-positive price.
pub fn dated_log_returns(history: &PriceHistory) -> RiskResult<Vec<(Date, f64)>> {
    history.validate()?;

    Ok(history
        .points()
        .windows(2)
        .map(|pair| (pair[1].date, (pair[1].adjusted_close / pair[0].adjusted_close).ln()))
        .collect())
}

/// Return series sharing one date index, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedReturns {
    tickers: Vec<Ticker>,
    dates: Vec<Date>,
    series: Vec<Vec<f64>>,
}

impl AlignedReturns {
    /// Tickers, index-aligned with [`series`](Self::series).
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Common return dates, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// One return series per asset, each of length [`len`](Self::len).
    pub fn series(&self) -> &[Vec<f64>] {
        &self.series
    }

    /// Number of aligned observations per asset.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True if the window holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of assets.
    pub fn asset_count(&self) -> usize {
        self.tickers.len()
    }

    /// First date of the window.
    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Last date of the window.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }
}

/// Intersects per-asset dated returns and keeps the last `sample_count` common dates.
///
/// # Errors
///
/// - `InvalidInput` for an empty input or a zero sample count
/// - `DataUnavailable` when fewer than `sample_count` dates are common to every
///   asset; the error names the asset with the fewest own observations
pub fn align_returns(
    dated: &[(Ticker, Vec<(Date, f64)>)],
    sample_count: usize,
) -> RiskResult<AlignedReturns> {
    if dated.is_empty() {
        return Err(RiskError::invalid_input("no return series to align"));
    }
    if sample_count == 0 {
        return Err(RiskError::invalid_input("sample count must be positive"));
    }

    let lookups: Vec<BTreeMap<Date, f64>> = dated
        .iter()
        .map(|(_, returns)| returns.iter().copied().collect())
        .collect();

    let mut common: BTreeSet<Date> = lookups[0].keys().copied().collect();
    for lookup in &lookups[1..] {
        common.retain(|date| lookup.contains_key(date));
    }

    if common.len() < sample_count {
        // min_by_key keeps the first of equal minima, i.e. caller order
        let (shortest, _) = dated
            .iter()
            .min_by_key(|(_, returns)| returns.len())
            .ok_or_else(|| RiskError::invalid_input("no return series to align"))?;
        return Err(RiskError::data_unavailable(
            shortest,
            format!(
                "{} aligned returns across {} assets, need {sample_count}",
                common.len(),
                dated.len()
            ),
        ));
    }

    let common: Vec<Date> = common.into_iter().collect();
    let dates = common[common.len() - sample_count..].to_vec();
    let series = lookups
        .iter()
        .map(|lookup| dates.iter().map(|date| lookup[date]).collect())
        .collect();

    Ok(AlignedReturns {
        tickers: dated.iter().map(|(ticker, _)| ticker.clone()).collect(),
        dates,
        series,
    })
}
