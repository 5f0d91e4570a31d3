//! Descriptive statistics over return series.
//!
//! Sample estimators use the unbiased (n - 1) denominator.

use crate::error::{MathError, MathResult};

/// Arithmetic mean of a series.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty series.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// True if every value equals the first (an empty series counts as constant).
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Sample covariance with the n - 1 denominator.
///
/// # Errors
///
/// - `MathError::DimensionMismatch` if the series differ in length
/// - `MathError::InsufficientData` for fewer than two observations
pub fn sample_covariance(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::length_mismatch(a.len(), b.len()));
    }
    if a.len() < 2 {
        return Err(MathError::insufficient_data(2, a.len()));
    }

    let mean_a = mean(a)?;
    let mean_b = mean(b)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();

    Ok(sum / (a.len() - 1) as f64)
}

/// Sample variance with the n - 1 denominator.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    sample_covariance(values, values)
}

/// Sample standard deviation with the n - 1 denominator.
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    let variance = sample_variance(values)?;
    if is_constant(values) {
        return Ok(0.0);
    }
    Ok(variance.max(0.0).sqrt())
}

/// Pearson correlation from sample covariance and sample standard deviations.
///
/// # Errors
///
/// Returns `MathError::DivisionByZero` if either series is constant.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> MathResult<f64> {
    let covariance = sample_covariance(a, b)?;
    let denominator = sample_std_dev(a)? * sample_std_dev(b)?;

    if denominator == 0.0 {
        return Err(MathError::DivisionByZero { value: denominator });
    }
    Ok(covariance / denominator)
}
