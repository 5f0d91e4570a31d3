//! # EWVaR Ext File
//!
//! Price history sources that need no network access:
//! - CSV-based price history source for EOD files and offline runs
//! - In-memory price history source for tests and canned fixtures
//!
//! For live vendor data, implement [`PriceHistoryFetcher`] in a separate crate.
//!
//! [`PriceHistoryFetcher`]: ewvar_traits::PriceHistoryFetcher

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;

pub use market_data::*;
