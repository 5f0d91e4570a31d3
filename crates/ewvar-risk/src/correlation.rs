//! Per-asset volatilities and the asset-by-asset correlation matrix.

use std::fmt;

use ewvar_math::ewma::{ewma_correlation, ewma_volatility};
use ewvar_math::statistics::{pearson_correlation, sample_std_dev};
use ewvar_math::MathError;
use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use ewvar_core::Ticker;

use crate::config::VarConfig;
use crate::error::{RiskError, RiskResult};

/// Tolerance for the unit diagonal, symmetry and bounds of a supplied matrix.
const MATRIX_TOLERANCE: f64 = 1e-12;

/// How volatilities and correlations are estimated from returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EstimationMode {
    /// Exponentially weighted, newest observation weighted most
    Ewma {
        /// Decay in (0, 1)
        lambda: f64,
    },
    /// Equal weights with an n-1 denominator
    Sample,
}

impl EstimationMode {
    /// Mode selected by a configuration.
    #[must_use]
    pub fn from_config(config: &VarConfig) -> Self {
        if config.use_ewma {
            Self::Ewma {
                lambda: config.decay_lambda,
            }
        } else {
            Self::Sample
        }
    }

    /// Volatility of one return series.
    ///
    /// # Errors
    ///
    /// `NumericalDegenerate` for a decay outside (0, 1); `InvalidInput` for a
    /// series too short for the mode.
    pub fn volatility(&self, returns: &[f64]) -> RiskResult<f64> {
        let vol = match *self {
            Self::Ewma { lambda } => ewma_volatility(returns, lambda)?,
            Self::Sample => sample_std_dev(returns)?,
        };
        Ok(vol)
    }

    /// Correlation of two equal-length return series.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on a length mismatch; `NumericalDegenerate` if either
    /// series is constant.
    pub fn correlation(&self, a: &[f64], b: &[f64]) -> RiskResult<f64> {
        let rho = match *self {
            Self::Ewma { lambda } => ewma_correlation(a, b, lambda)?,
            Self::Sample => pearson_correlation(a, b)?,
        };
        Ok(rho)
    }

    /// Decay parameter, if any.
    #[must_use]
    pub fn lambda(&self) -> Option<f64> {
        match *self {
            Self::Ewma { lambda } => Some(lambda),
            Self::Sample => None,
        }
    }
}

impl fmt::Display for EstimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ewma { lambda } => write!(f, "EWMA (lambda {lambda})"),
            Self::Sample => write!(f, "sample"),
        }
    }
}

/// Volatility of every series, computed in parallel.
///
/// # Errors
///
/// The first estimation error in asset order.
pub fn volatilities(series: &[Vec<f64>], mode: EstimationMode) -> RiskResult<Vec<f64>> {
    series
        .par_iter()
        .map(|returns| mode.volatility(returns))
        .collect()
}

/// Square, symmetric correlation matrix with a unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct CorrelationMatrix(DMatrix<f64>);

impl CorrelationMatrix {
    /// Identity matrix: uncorrelated assets.
    #[must_use]
    pub fn identity(size: usize) -> Self {
        Self(DMatrix::identity(size, size))
    }

    /// Builds a matrix from row-major entries.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless the rows form a non-empty square matrix that is
    /// symmetric, has a unit diagonal, and has every entry in [-1, 1].
    pub fn from_rows(rows: &[Vec<f64>]) -> RiskResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(RiskError::invalid_input("correlation matrix is empty"));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(MathError::DimensionMismatch {
                rows1: size,
                cols1: row.len(),
                rows2: size,
                cols2: size,
            }
            .into());
        }

        let matrix = DMatrix::from_fn(size, size, |i, j| rows[i][j]);
        for i in 0..size {
            if (matrix[(i, i)] - 1.0).abs() > MATRIX_TOLERANCE {
                return Err(RiskError::invalid_input(format!(
                    "diagonal entry {i} is {}, expected 1",
                    matrix[(i, i)]
                )));
            }
            for j in 0..size {
                let rho = matrix[(i, j)];
                if !rho.is_finite() || rho.abs() > 1.0 + MATRIX_TOLERANCE {
                    return Err(RiskError::invalid_input(format!(
                        "entry ({i}, {j}) = {rho} is outside [-1, 1]"
                    )));
                }
                if (rho - matrix[(j, i)]).abs() > MATRIX_TOLERANCE {
                    return Err(RiskError::invalid_input(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(Self(matrix))
    }

    /// Number of assets.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.nrows()
    }

    /// Entry `(i, j)`, if in range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.0.get((i, j)).copied()
    }

    /// Underlying matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    /// Row-major copy of the entries.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.0
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

impl From<CorrelationMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CorrelationMatrix) -> Self {
        matrix.to_rows()
    }
}

impl TryFrom<Vec<Vec<f64>>> for CorrelationMatrix {
    type Error = RiskError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

/// Assembles the correlation matrix of aligned return series.
///
/// Only the upper triangle is estimated; it is mirrored into the lower one.
/// An asset with zero volatility is uncorrelated with every other asset.
///
/// # Errors
///
/// `InvalidInput` if the series, tickers and volatilities disagree in length.
pub fn build_correlation_matrix(
    tickers: &[Ticker],
    series: &[Vec<f64>],
    vols: &[f64],
    mode: EstimationMode,
) -> RiskResult<CorrelationMatrix> {
    let size = series.len();
    if tickers.len() != size || vols.len() != size {
        return Err(RiskError::invalid_input(format!(
            "{} tickers, {} return series, {} volatilities",
            tickers.len(),
            size,
            vols.len()
        )));
    }

    for (ticker, vol) in tickers.iter().zip(vols) {
        if *vol == 0.0 && size > 1 {
            warn!(ticker = %ticker, "Constant returns, treating asset as uncorrelated");
        }
    }

    let mut matrix = DMatrix::identity(size, size);
    for i in 0..size {
        for j in (i + 1)..size {
            let rho = if vols[i] == 0.0 || vols[j] == 0.0 {
                0.0
            } else {
                mode.correlation(&series[i], &series[j])?.clamp(-1.0, 1.0)
            };
            matrix[(i, j)] = rho;
            matrix[(j, i)] = rho;
        }
    }

    Ok(CorrelationMatrix(matrix))
}
