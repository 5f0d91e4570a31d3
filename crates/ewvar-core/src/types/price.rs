//! Daily price observations.

use serde::{Deserialize, Serialize};

use super::{Date, Ticker};
use crate::error::{CoreError, CoreResult};

/// One daily adjusted close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date
    pub date: Date,
    /// Adjusted close price
    pub adjusted_close: f64,
}

impl PricePoint {
    /// Create a new price point.
    #[must_use]
    pub fn new(date: Date, adjusted_close: f64) -> Self {
        Self {
            date,
            adjusted_close,
        }
    }
}

/// The daily price history of a single ticker.
///
/// Observations are expected in strictly ascending date order; call
/// [`PriceHistory::validate`] before using a history from an untrusted source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Create a history from observations as given.
    pub fn new(ticker: impl Into<Ticker>, points: Vec<PricePoint>) -> Self {
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    /// Create a history from `(date, price)` pairs.
    pub fn from_pairs(
        ticker: impl Into<Ticker>,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        Self::new(
            ticker,
            pairs
                .into_iter()
                .map(|(date, price)| PricePoint::new(date, price))
                .collect(),
        )
    }

    /// The ticker this history belongs to.
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Observations in stored order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the first observation.
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the last observation.
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Adjusted closes in stored order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.adjusted_close).collect()
    }

    /// Sort observations by date. Later duplicates of a date replace earlier ones.
    pub fn sort_by_date(&mut self) {
        self.points.sort_by_key(|p| p.date);
        // keep the last observation for a repeated date
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(self.points.len());
        for point in self.points.drain(..) {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        self.points = deduped;
    }

    /// Observations dated on or before `as_of`.
    #[must_use]
    pub fn up_to(&self, as_of: Date) -> Self {
        Self {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.date <= as_of)
                .copied()
                .collect(),
        }
    }

    /// Observations in the inclusive range `[start, end]`.
    #[must_use]
    pub fn between(&self, start: Date, end: Date) -> Self {
        Self {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect(),
        }
    }

    /// Check ordering and price sanity.
    ///
    /// # Errors
    ///
    /// - `CoreError::UnorderedHistory` if dates are not strictly ascending
    /// - `CoreError::InvalidPrice` for a non-finite or non-positive price
    pub fn validate(&self) -> CoreResult<()> {
        let mut previous: Option<Date> = None;
        for point in &self.points {
            if !point.adjusted_close.is_finite() || point.adjusted_close <= 0.0 {
                return Err(CoreError::InvalidPrice {
                    ticker: self.ticker.to_string(),
                    date: point.date.to_string(),
                    value: point.adjusted_close,
                });
            }
            if previous.is_some_and(|prev| point.date <= prev) {
                return Err(CoreError::UnorderedHistory {
                    ticker: self.ticker.to_string(),
                    date: point.date.to_string(),
                });
            }
            previous = Some(point.date);
        }
        Ok(())
    }
}
