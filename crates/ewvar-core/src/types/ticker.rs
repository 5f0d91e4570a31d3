//! Asset identifiers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Asset identifier (exchange ticker or internal symbol).
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker without validation.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Parse a ticker, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTicker` for an empty symbol or one that
    /// contains interior whitespace or commas.
    pub fn parse(symbol: &str) -> CoreResult<Self> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() || trimmed.contains(|c: char| c.is_whitespace() || c == ',') {
            return Err(CoreError::invalid_ticker(symbol));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A non-empty, ordered, duplicate-free list of tickers.
///
/// Order is the caller's order and is the index order of every weight,
/// volatility and correlation vector downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TickerSet(Vec<Ticker>);

impl TickerSet {
    /// Build a ticker set, validating every symbol.
    ///
    /// # Errors
    ///
    /// - `CoreError::EmptyTickerSet` if no tickers are given
    /// - `CoreError::InvalidTicker` for a malformed symbol
    /// - `CoreError::DuplicateTicker` if a symbol repeats
    pub fn new<I, S>(symbols: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut tickers = Vec::new();

        for symbol in symbols {
            let ticker = Ticker::parse(symbol.as_ref())?;
            if !seen.insert(ticker.clone()) {
                return Err(CoreError::DuplicateTicker {
                    symbol: ticker.0,
                });
            }
            tickers.push(ticker);
        }

        if tickers.is_empty() {
            return Err(CoreError::EmptyTickerSet);
        }
        Ok(Self(tickers))
    }

    /// Parse a comma-separated list such as `"SPY, TLT,GLD"`.
    pub fn parse_list(list: &str) -> CoreResult<Self> {
        Self::new(list.split(',').filter(|s| !s.trim().is_empty()))
    }

    /// Number of tickers (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in caller order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ticker> {
        self.0.iter()
    }

    /// Position of a ticker, if present.
    pub fn position(&self, ticker: &Ticker) -> Option<usize> {
        self.0.iter().position(|t| t == ticker)
    }
}

impl<'a> IntoIterator for &'a TickerSet {
    type Item = &'a Ticker;
    type IntoIter = std::slice::Iter<'a, Ticker>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TickerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(Ticker::as_str).collect();
        write!(f, "{}", joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_parse() {
        assert_eq!(Ticker::parse(" SPY ").unwrap().as_str(), "SPY");
        assert!(Ticker::parse("").is_err());
        assert!(Ticker::parse("   ").is_err());
        assert!(Ticker::parse("BRK B").is_err());
    }

    #[test]
    fn test_ticker_set_preserves_order() {
        let set = TickerSet::new(["TLT", "SPY", "GLD"]).unwrap();
        let symbols: Vec<&str> = set.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, vec!["TLT", "SPY", "GLD"]);
        assert_eq!(set.position(&Ticker::from("GLD")), Some(2));
    }

    #[test]
    fn test_ticker_set_rejects_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(TickerSet::new(empty), Err(CoreError::EmptyTickerSet));
    }

    #[test]
    fn test_ticker_set_rejects_duplicates() {
        let err = TickerSet::new(["SPY", "TLT", "SPY"]).unwrap_err();
        assert_eq!(
            err,
            CoreError::DuplicateTicker {
                symbol: "SPY".into()
            }
        );
    }

    #[test]
    fn test_parse_list() {
        let set = TickerSet::parse_list("SPY, TLT,GLD,").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "SPY,TLT,GLD");
        assert!(TickerSet::parse_list(" , ").is_err());
    }
}
