//! Linear algebra utilities.
//!
//! Matrix operations needed for portfolio variance aggregation.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

fn check_square_against(matrix: &DMatrix<f64>, len: usize) -> MathResult<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(MathError::invalid_input("Matrix must be square"));
    }
    if matrix.nrows() != len {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: len,
            cols2: 1,
        });
    }
    Ok(())
}

/// Computes the quadratic form `xᵀ · M · x`.
///
/// # Arguments
///
/// * `x` - Vector of length n
/// * `matrix` - Square n × n matrix
///
/// # Example
///
/// ```rust
/// use ewvar_math::linear_algebra::quadratic_form;
/// use nalgebra::DMatrix;
///
/// let identity = DMatrix::<f64>::identity(2, 2);
/// let q = quadratic_form(&[3.0, 4.0], &identity).unwrap();
/// assert_eq!(q, 25.0);
/// ```
pub fn quadratic_form(x: &[f64], matrix: &DMatrix<f64>) -> MathResult<f64> {
    check_square_against(matrix, x.len())?;

    let v = DVector::from_column_slice(x);
    Ok(v.dot(&(matrix * &v)))
}

/// Computes the product `M · x`.
pub fn matrix_vector_product(matrix: &DMatrix<f64>, x: &[f64]) -> MathResult<Vec<f64>> {
    check_square_against(matrix, x.len())?;

    let v = DVector::from_column_slice(x);
    Ok((matrix * v).iter().copied().collect())
}

/// True if the matrix is square and `|m[i,j] - m[j,i]| <= tolerance` everywhere.
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return false;
    }

    for i in 0..n {
        for j in i + 1..n {
            if (matrix[(i, j)] - matrix[(j, i)]).abs() > tolerance {
                return false;
            }
        }
    }
    true
}
