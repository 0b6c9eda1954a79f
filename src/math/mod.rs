//! Mathematical utilities for pair analysis.
//!
//! Statistical primitives used by the spread engine: ordinary least squares
//! regression for hedge-ratio estimation and a mean-reversion half-life
//! estimator for computed spread series.

pub mod half_life;
pub mod ols;

pub use half_life::half_life;
pub use ols::{ols_regression, OlsFit, RegressionError};
