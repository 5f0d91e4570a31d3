//! # EWVaR Risk
//!
//! Portfolio Value at Risk from daily price histories.
//!
//! - **Returns**: log returns per asset, intersected on common dates
//! - **Estimation**: EWMA or sample volatilities and correlations
//! - **VaR**: variance-covariance aggregation scaled by a Student's-t quantile
//! - **Engine**: fail-fast fetching through a [`PriceHistoryFetcher`]
//!
//! ## Example
//!
//! ```rust
//! use ewvar_risk::prelude::*;
//!
//! let corr = CorrelationMatrix::identity(2);
//! let result = parametric_var(&[0.5, 0.5], &[0.02, 0.02], &corr, 0.95, 4).unwrap();
//! assert!(result.var > 0.0);
//! ```
//!
//! [`PriceHistoryFetcher`]: ewvar_traits::PriceHistoryFetcher

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod correlation;
pub mod engine;
mod error;
pub mod returns;
pub mod var;

pub use config::VarConfig;
pub use engine::{estimate_var, VarEngine, VarRequest};
pub use error::{ErrorKind, RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::VarConfig;
    pub use crate::correlation::{
        build_correlation_matrix, volatilities, CorrelationMatrix, EstimationMode,
    };
    pub use crate::engine::{estimate_var, VarEngine, VarRequest};
    pub use crate::returns::{align_returns, dated_log_returns, log_returns, AlignedReturns};
    pub use crate::var::{
        parametric_var, portfolio_variance, quantile_factor, ParametricVar, VarReport,
    };
    pub use crate::{ErrorKind, RiskError, RiskResult};
}
