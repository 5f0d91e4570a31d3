//! Error types for VaR estimation.
//!
//! Every failure surfaces as one of a small set of kinds so callers can tell
//! bad requests, missing data and numerical breakdowns apart.

use std::fmt;

use ewvar_core::{CoreError, Ticker};
use ewvar_math::MathError;
use thiserror::Error;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during VaR estimation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// Request parameters are malformed or inconsistent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A ticker's price history is missing or too short. Aborts the whole
    /// computation.
    #[error("data unavailable for {ticker}: {reason}")]
    DataUnavailable {
        /// The ticker that could not be served
        ticker: Ticker,
        /// What was missing
        reason: String,
    },

    /// The estimate is numerically undefined.
    #[error("numerically degenerate: {0}")]
    NumericalDegenerate(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Discriminant of a [`RiskError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RiskError::InvalidInput`]
    InvalidInput,
    /// See [`RiskError::DataUnavailable`]
    DataUnavailable,
    /// See [`RiskError::NumericalDegenerate`]
    NumericalDegenerate,
    /// See [`RiskError::Config`]
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidInput => "InvalidInput",
            Self::DataUnavailable => "DataUnavailable",
            Self::NumericalDegenerate => "NumericalDegenerate",
            Self::Config => "Config",
        };
        f.write_str(name)
    }
}

impl RiskError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Creates a data unavailable error naming the ticker.
    #[must_use]
    pub fn data_unavailable(ticker: &Ticker, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.clone(),
            reason: reason.into(),
        }
    }

    /// Creates a numerically degenerate error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::NumericalDegenerate(reason.into())
    }

    /// The kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            Self::NumericalDegenerate(_) => ErrorKind::NumericalDegenerate,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidInput { .. }
            | MathError::DimensionMismatch { .. }
            | MathError::InsufficientData { .. } => Self::InvalidInput(err.to_string()),
            MathError::InvalidDecay { .. }
            | MathError::DivisionByZero { .. }
            | MathError::UndefinedQuantile { .. } => Self::NumericalDegenerate(err.to_string()),
        }
    }
}

impl From<CoreError> for RiskError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::InvalidPrice { ticker, .. } | CoreError::UnorderedHistory { ticker, .. } => {
                Self::DataUnavailable {
                    ticker: Ticker::new(ticker.clone()),
                    reason: err.to_string(),
                }
            }
            CoreError::InvalidDate { .. }
            | CoreError::InvalidTicker { .. }
            | CoreError::DuplicateTicker { .. }
            | CoreError::EmptyTickerSet => Self::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_kinds() {
        let quantile: RiskError = MathError::UndefinedQuantile { probability: 1.0 }.into();
        assert_eq!(quantile.kind(), ErrorKind::NumericalDegenerate);

        let decay: RiskError = MathError::InvalidDecay { lambda: 1.2 }.into();
        assert_eq!(decay.kind(), ErrorKind::NumericalDegenerate);

        let mismatch: RiskError = MathError::length_mismatch(3, 4).into();
        assert_eq!(mismatch.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_core_error_kinds() {
        let dup: RiskError = CoreError::DuplicateTicker {
            symbol: "SPY".into(),
        }
        .into();
        assert_eq!(dup.kind(), ErrorKind::InvalidInput);

        let price: RiskError = CoreError::InvalidPrice {
            ticker: "TLT".into(),
            date: "2024-01-02".into(),
            value: -1.0,
        }
        .into();
        match price {
            RiskError::DataUnavailable { ticker, .. } => assert_eq!(ticker.as_str(), "TLT"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_display_names_ticker() {
        let err = RiskError::data_unavailable(&Ticker::from("QQQ"), "not found");
        assert_eq!(err.to_string(), "data unavailable for QQQ: not found");
        assert_eq!(err.kind().to_string(), "DataUnavailable");
    }
}
