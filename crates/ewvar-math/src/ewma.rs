//! Exponentially weighted volatility and correlation.
//!
//! For a series indexed oldest to newest as `0..n`, observation `i` carries
//! the weight
//!
//! ```text
//! w_i = (1 - λ) · λ^(n-1-i)
//! ```
//!
//! so the most recent observation has the largest weight `1 - λ`. The weights
//! sum to `1 - λ^n` and are not renormalised.
//!
//! Deviations are taken from the plain arithmetic mean of the series, not an
//! exponentially weighted mean. Reference values are computed this way, so the
//! estimators below keep that convention.

use crate::error::{MathError, MathResult};
use crate::statistics::{is_constant, mean};

/// Checks that a decay factor lies in the open interval (0, 1).
///
/// # Errors
///
/// Returns `MathError::InvalidDecay` otherwise (including NaN).
pub fn validate_decay(lambda: f64) -> MathResult<()> {
    if lambda > 0.0 && lambda < 1.0 {
        Ok(())
    } else {
        Err(MathError::InvalidDecay { lambda })
    }
}

/// EWMA observation weights, oldest first.
///
/// # Example
///
/// ```rust
/// use ewvar_math::ewma::decay_weights;
///
/// let w = decay_weights(3, 0.5).unwrap();
/// assert_eq!(w, vec![0.125, 0.25, 0.5]);
/// ```
pub fn decay_weights(n: usize, lambda: f64) -> MathResult<Vec<f64>> {
    validate_decay(lambda)?;

    let mut weights = vec![0.0; n];
    let mut weight = 1.0 - lambda;
    for slot in weights.iter_mut().rev() {
        *slot = weight;
        weight *= lambda;
    }
    Ok(weights)
}

/// Exponentially weighted covariance of two equally long series.
///
/// # Errors
///
/// - `MathError::InvalidDecay` if `lambda` is outside (0, 1)
/// - `MathError::DimensionMismatch` if the series differ in length
/// - `MathError::InsufficientData` for empty series
pub fn ewma_covariance(a: &[f64], b: &[f64], lambda: f64) -> MathResult<f64> {
    validate_decay(lambda)?;
    if a.len() != b.len() {
        return Err(MathError::length_mismatch(a.len(), b.len()));
    }

    let mean_a = mean(a)?;
    let mean_b = mean(b)?;
    let weights = decay_weights(a.len(), lambda)?;

    Ok(weights
        .iter()
        .zip(a.iter().zip(b))
        .map(|(w, (x, y))| w * (x - mean_a) * (y - mean_b))
        .sum())
}

/// Exponentially weighted volatility of a return series.
///
/// Square root of the weighted sum of squared deviations from the
/// arithmetic mean.
///
/// # Errors
///
/// - `MathError::InvalidDecay` if `lambda` is outside (0, 1)
/// - `MathError::InsufficientData` for an empty series
pub fn ewma_volatility(returns: &[f64], lambda: f64) -> MathResult<f64> {
    let variance = ewma_covariance(returns, returns, lambda)?;
    // rounding in the mean would otherwise leave a tiny positive residual
    if is_constant(returns) {
        return Ok(0.0);
    }
    Ok(variance.max(0.0).sqrt())
}

/// Exponentially weighted correlation of two equally long series.
///
/// Weighted covariance divided by the product of the two EWMA volatilities.
///
/// # Errors
///
/// - `MathError::DimensionMismatch` if the series differ in length
/// - `MathError::DivisionByZero` if either series is constant
/// - `MathError::InvalidDecay` if `lambda` is outside (0, 1)
pub fn ewma_correlation(a: &[f64], b: &[f64], lambda: f64) -> MathResult<f64> {
    let covariance = ewma_covariance(a, b, lambda)?;
    let denominator = ewma_volatility(a, lambda)? * ewma_volatility(b, lambda)?;

    if denominator == 0.0 {
        return Err(MathError::DivisionByZero { value: denominator });
    }
    Ok(covariance / denominator)
}
