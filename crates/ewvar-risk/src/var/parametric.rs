//! Parametric (variance-covariance) VaR with a Student's-t quantile.

use ewvar_math::distributions::t_quantile;
use ewvar_math::linear_algebra::{matrix_vector_product, quadratic_form};
use tracing::debug;

use crate::correlation::CorrelationMatrix;
use crate::error::{RiskError, RiskResult};

/// Relative size of a negative variance absorbed as rounding noise.
const NEGATIVE_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Student's-t quantile at `confidence` with `sample_count` degrees of freedom.
///
/// # Errors
///
/// `NumericalDegenerate` at confidence 0 or 1; `InvalidInput` for any other
/// value outside (0, 1) or a zero sample count.
pub fn quantile_factor(confidence: f64, sample_count: usize) -> RiskResult<f64> {
    Ok(t_quantile(confidence, sample_count as f64)?)
}

/// Per-asset weight times volatility.
fn weighted_vols(weights: &[f64], vols: &[f64]) -> RiskResult<Vec<f64>> {
    if weights.len() != vols.len() {
        return Err(RiskError::invalid_input(format!(
            "{} weights for {} volatilities",
            weights.len(),
            vols.len()
        )));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite()) {
        return Err(RiskError::invalid_input(format!("weight {w} is not finite")));
    }
    Ok(weights.iter().zip(vols).map(|(w, v)| w * v).collect())
}

/// Portfolio variance `wvᵀ · C · wv` with `wv[i] = weight[i] * vol[i]`.
///
/// The result is not clamped and may be slightly negative.
///
/// # Errors
///
/// `InvalidInput` when weights, volatilities and matrix disagree in size.
pub fn portfolio_variance(
    weights: &[f64],
    vols: &[f64],
    correlation: &CorrelationMatrix,
) -> RiskResult<f64> {
    let wv = weighted_vols(weights, vols)?;
    Ok(quadratic_form(&wv, correlation.as_matrix())?)
}

/// Result of the parametric aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricVar {
    /// t quantile at the confidence level
    pub quantile_factor: f64,
    /// Portfolio return standard deviation
    pub portfolio_sigma: f64,
    /// VaR as a fractional loss
    pub var: f64,
    /// Euler allocation of `var` per asset; sums to `var`
    pub component_var: Vec<f64>,
}

/// Combines weights, volatilities and correlations into VaR.
///
/// `VaR = sqrt(max(wvᵀ · C · wv, 0)) * t(confidence, sample_count)`. A negative
/// variance within `1e-12 * (Σ|wv|)²` of zero is treated as zero.
///
/// # Errors
///
/// - `InvalidInput` for mismatched sizes or non-finite weights
/// - `NumericalDegenerate` for an undefined quantile or a clearly negative
///   variance (a correlation matrix that is not positive semi-definite)
pub fn parametric_var(
    weights: &[f64],
    vols: &[f64],
    correlation: &CorrelationMatrix,
    confidence: f64,
    sample_count: usize,
) -> RiskResult<ParametricVar> {
    let quantile = quantile_factor(confidence, sample_count)?;

    let wv = weighted_vols(weights, vols)?;
    let matrix = correlation.as_matrix();
    let variance = quadratic_form(&wv, matrix)?;

    let scale: f64 = wv.iter().map(|x| x.abs()).sum();
    let tolerance = NEGATIVE_VARIANCE_TOLERANCE * scale * scale;
    if variance.is_nan() || variance < -tolerance {
        return Err(RiskError::degenerate(format!(
            "portfolio variance {variance:e} is negative beyond tolerance {tolerance:e}"
        )));
    }
    if variance < 0.0 {
        debug!(variance, tolerance, "Clamped rounding-level negative variance to zero");
    }

    let sigma = variance.max(0.0).sqrt();
    let var = sigma * quantile;

    let component_var = if sigma > 0.0 {
        let marginal = matrix_vector_product(matrix, &wv)?;
        wv.iter()
            .zip(&marginal)
            .map(|(x, m)| x * m / sigma * quantile)
            .collect()
    } else {
        vec![0.0; wv.len()]
    };

    Ok(ParametricVar {
        quantile_factor: quantile,
        portfolio_sigma: sigma,
        var,
        component_var,
    })
}
