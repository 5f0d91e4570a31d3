//! # EWVaR Math
//!
//! Numerical building blocks for parametric Value at Risk.
//!
//! This crate provides:
//!
//! - **EWMA**: Exponentially weighted volatility and correlation
//! - **Statistics**: Arithmetic mean, sample variance and Pearson correlation
//! - **Linear Algebra**: Quadratic forms and symmetric matrix checks
//! - **Distributions**: Student's-t inverse CDF
//!
//! Everything here is a pure function over slices: no I/O, no shared state,
//! safe to call from any thread.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod distributions;
pub mod error;
pub mod ewma;
pub mod linear_algebra;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::t_quantile;
    pub use crate::error::{MathError, MathResult};
    pub use crate::ewma::{
        decay_weights, ewma_correlation, ewma_covariance, ewma_volatility, validate_decay,
    };
    pub use crate::linear_algebra::{is_symmetric, matrix_vector_product, quadratic_form};
    pub use crate::statistics::{
        is_constant, mean, pearson_correlation, sample_covariance, sample_std_dev,
    };
}

pub use error::{MathError, MathResult};
