//! Distribution quantiles.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{MathError, MathResult};

/// Inverse CDF of the standard Student's t-distribution.
///
/// # Arguments
///
/// * `probability` - Cumulative probability in the open interval (0, 1)
/// * `degrees_of_freedom` - Positive degrees of freedom
///
/// # Errors
///
/// - `MathError::UndefinedQuantile` at `probability` 0 or 1, where the
///   quantile is infinite
/// - `MathError::InvalidInput` for probabilities outside [0, 1], NaN, or
///   non-positive degrees of freedom
///
/// # Example
///
/// ```rust
/// use ewvar_math::distributions::t_quantile;
///
/// let q = t_quantile(0.95, 4.0).unwrap();
/// assert!((q - 2.131846786).abs() < 1e-4);
/// ```
pub fn t_quantile(probability: f64, degrees_of_freedom: f64) -> MathResult<f64> {
    if probability == 0.0 || probability == 1.0 {
        return Err(MathError::UndefinedQuantile { probability });
    }
    if !(probability > 0.0 && probability < 1.0) {
        return Err(MathError::invalid_input(format!(
            "probability {probability} is outside (0, 1)"
        )));
    }
    if !(degrees_of_freedom.is_finite() && degrees_of_freedom > 0.0) {
        return Err(MathError::invalid_input(format!(
            "degrees of freedom must be positive, got {degrees_of_freedom}"
        )));
    }

    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| MathError::invalid_input(e.to_string()))?;
    let quantile = dist.inverse_cdf(probability);

    if quantile.is_finite() {
        Ok(quantile)
    } else {
        Err(MathError::UndefinedQuantile { probability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_quantiles() {
        assert_abs_diff_eq!(t_quantile(0.95, 4.0).unwrap(), 2.131846786, epsilon = 1e-4);
        assert_abs_diff_eq!(t_quantile(0.975, 10.0).unwrap(), 2.228138852, epsilon = 1e-4);
    }

    #[test]
    fn test_median_is_zero() {
        assert_abs_diff_eq!(t_quantile(0.5, 7.0).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_symmetry() {
        let upper = t_quantile(0.9, 12.0).unwrap();
        let lower = t_quantile(0.1, 12.0).unwrap();
        assert_abs_diff_eq!(upper, -lower, epsilon = 1e-6);
    }

    #[test]
    fn test_approaches_normal_for_large_df() {
        // z(0.99) = 2.326348
        let q = t_quantile(0.99, 10_000.0).unwrap();
        assert_abs_diff_eq!(q, 2.326348, epsilon = 1e-3);
        assert!(t_quantile(0.99, 252.0).unwrap() > q);
    }

    #[test]
    fn test_boundaries_are_undefined() {
        assert_eq!(
            t_quantile(1.0, 252.0),
            Err(MathError::UndefinedQuantile { probability: 1.0 })
        );
        assert_eq!(
            t_quantile(0.0, 252.0),
            Err(MathError::UndefinedQuantile { probability: 0.0 })
        );
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            t_quantile(1.5, 10.0),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            t_quantile(f64::NAN, 10.0),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            t_quantile(0.95, 0.0),
            Err(MathError::InvalidInput { .. })
        ));
    }
}
