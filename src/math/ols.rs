//! Ordinary least squares regression on two equal-length series.
//!
//! Fits `A_i = slope * B_i + intercept`, i.e. B with an added constant
//! regressor, solved via the 2x2 normal equations:
//!
//! ```text
//! slope     = cov(A, B) / var(B)
//! intercept = mean(A) - slope * mean(B)
//! ```
//!
//! The slope is the pair's hedge ratio: how many units of B offset one
//! unit of A. Pure function, no state, deterministic given inputs.

use thiserror::Error;

/// Errors from the regression primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// Either input series has zero length
    #[error("input series must not be empty")]
    EmptyInput,

    /// Input series have different lengths
    #[error("input series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A line requires at least two points
    #[error("OLS regression requires at least 2 data points, got {actual}")]
    InsufficientData { actual: usize },

    /// An input element is NaN or infinite
    #[error("series {series} contains a non-numeric value at index {index}")]
    NonNumericInput { series: &'static str, index: usize },

    /// The regressor is constant, so the slope is undefined
    #[error("regressor series is constant (zero variance), slope is undefined")]
    DegenerateRegression,
}

/// Fitted regression coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    /// Hedge ratio (units of B per unit of A).
    pub slope: f64,
    /// Constant offset.
    pub intercept: f64,
}

/// Fit `series_a = slope * series_b + intercept` by least squares.
///
/// Inputs are validated before any computation: both series must be
/// non-empty, of equal length, hold at least two points, and contain only
/// finite values. A constant `series_b` has zero variance and fails with
/// [`RegressionError::DegenerateRegression`] instead of dividing by zero.
pub fn ols_regression(series_a: &[f64], series_b: &[f64]) -> Result<OlsFit, RegressionError> {
    if series_a.is_empty() || series_b.is_empty() {
        return Err(RegressionError::EmptyInput);
    }
    if series_a.len() != series_b.len() {
        return Err(RegressionError::LengthMismatch {
            left: series_a.len(),
            right: series_b.len(),
        });
    }
    if series_a.len() < 2 {
        return Err(RegressionError::InsufficientData {
            actual: series_a.len(),
        });
    }
    for (name, series) in [("A", series_a), ("B", series_b)] {
        if let Some(index) = series.iter().position(|v| !v.is_finite()) {
            return Err(RegressionError::NonNumericInput {
                series: name,
                index,
            });
        }
    }

    let n = series_a.len() as f64;
    let mean_a = series_a.iter().sum::<f64>() / n;
    let mean_b = series_b.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_b = 0.0;
    for (a, b) in series_a.iter().zip(series_b.iter()) {
        let da = a - mean_a;
        let db = b - mean_b;
        covariance += da * db;
        var_b += db * db;
    }

    if var_b == 0.0 {
        return Err(RegressionError::DegenerateRegression);
    }

    let slope = covariance / var_b;
    let intercept = mean_a - slope * mean_b;

    Ok(OlsFit { slope, intercept })
}
