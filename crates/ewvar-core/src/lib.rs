//! # EWVaR Core
//!
//! Core domain types shared by every EWVaR crate.
//!
//! - **Types**: `Date`, `Ticker`, `TickerSet`, `PricePoint`, `PriceHistory`
//! - **Errors**: `CoreError` for malformed identifiers, dates and histories
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes keep tickers, dates and prices from being mixed up
//! - **Validated Construction**: A `TickerSet` is non-empty and free of duplicates
//!   by construction, so downstream code never re-checks it
//!
//! ## Example
//!
//! ```rust
//! use ewvar_core::prelude::*;
//!
//! let tickers = TickerSet::new(["SPY", "TLT"]).unwrap();
//! assert_eq!(tickers.len(), 2);
//!
//! let as_of = Date::from_ymd(2024, 6, 28).unwrap();
//! assert_eq!(as_of.to_string(), "2024-06-28");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, PriceHistory, PricePoint, Ticker, TickerSet};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, PriceHistory, PricePoint, Ticker, TickerSet};
