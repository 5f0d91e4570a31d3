//! CLI command implementations.

pub mod inspect;
pub mod var;

pub use inspect::InspectArgs;
pub use var::VarArgs;

use ewvar_core::{Date, TickerSet};

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a comma-separated ticker list.
pub fn parse_tickers(s: &str) -> CliResult<TickerSet> {
    TickerSet::parse_list(s).map_err(|e| CliError::InvalidTickers(e.to_string()))
}

/// Parses a comma-separated weight list.
pub fn parse_weights(s: &str) -> CliResult<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .map(|w| {
            w.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CliError::InvalidWeight(w.to_string()))
        })
        .collect()
}
