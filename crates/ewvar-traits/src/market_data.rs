//! Market data source traits.
//!
//! - [`PriceHistoryFetcher`]: Daily adjusted close history per ticker
//!
//! Sources own all I/O concerns (retries, rate limits, timeouts). The
//! estimation code only sees the histories they return.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use ewvar_core::{Date, PriceHistory, Ticker};

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (vendor REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// Database (for historical/EOD)
    Database,
    /// In-memory fixtures
    Manual,
}

/// Trait for daily price history providers.
///
/// `fetch_history` returns the observations dated within the inclusive range
/// `[start, end]`, ascending by date. Returning fewer observations than the
/// caller needs is not an error at this layer; the caller decides.
#[async_trait]
pub trait PriceHistoryFetcher: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the daily adjusted close history for one ticker.
    ///
    /// # Errors
    ///
    /// `TraitError::NotFound` if the source cannot resolve the ticker; any
    /// other variant for transport or parse failures.
    async fn fetch_history(
        &self,
        ticker: &Ticker,
        start: Date,
        end: Date,
    ) -> Result<PriceHistory, TraitError>;
}
