//! Error types for the EWVaR core types.
//!
//! These errors describe malformed inputs detected while constructing
//! domain values. Higher layers map them onto their own error kinds.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core domain construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error parsing or constructing a date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Ticker symbol is empty or malformed.
    #[error("Invalid ticker: '{symbol}'")]
    InvalidTicker {
        /// The rejected symbol.
        symbol: String,
    },

    /// The same ticker appears more than once in a ticker set.
    #[error("Duplicate ticker: {symbol}")]
    DuplicateTicker {
        /// The repeated symbol.
        symbol: String,
    },

    /// A ticker set must contain at least one ticker.
    #[error("Ticker set is empty")]
    EmptyTickerSet,

    /// Price is not a finite positive number.
    #[error("Invalid price for {ticker} on {date}: {value}")]
    InvalidPrice {
        /// Ticker the price belongs to.
        ticker: String,
        /// Observation date.
        date: String,
        /// The rejected value.
        value: f64,
    },

    /// Observations are not strictly ascending by date.
    #[error("Price history for {ticker} is not strictly ascending at {date}")]
    UnorderedHistory {
        /// Ticker whose history is out of order.
        ticker: String,
        /// First date that breaks the ordering.
        date: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid ticker error.
    #[must_use]
    pub fn invalid_ticker(symbol: impl Into<String>) -> Self {
        Self::InvalidTicker {
            symbol: symbol.into(),
        }
    }

    /// Returns the ticker this error refers to, if any.
    #[must_use]
    pub fn ticker(&self) -> Option<&str> {
        match self {
            Self::InvalidTicker { symbol } | Self::DuplicateTicker { symbol } => Some(symbol),
            Self::InvalidPrice { ticker, .. } | Self::UnorderedHistory { ticker, .. } => {
                Some(ticker)
            }
            Self::InvalidDate { .. } | Self::EmptyTickerSet => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_ticker_accessor() {
        let err = CoreError::DuplicateTicker {
            symbol: "SPY".into(),
        };
        assert_eq!(err.ticker(), Some("SPY"));
        assert_eq!(CoreError::EmptyTickerSet.ticker(), None);
    }
}
