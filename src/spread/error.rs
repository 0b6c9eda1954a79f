//! Error types for the spread engine

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::math::RegressionError;
use crate::window::Resolution;

/// Errors that can occur while aligning, recomputing, or upserting pair data
#[derive(Debug, Error)]
pub enum SpreadError {
    /// The two input series have different lengths
    #[error("input series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Paired elements at a position carry different timestamps
    #[error("timestamp mismatch at position {index}: {left} vs {right}")]
    TimestampMismatch {
        index: usize,
        left: DateTime<Utc>,
        right: DateTime<Utc>,
    },

    /// The table holds no value data for the pair
    #[error("no value data for {symbol1}/{symbol2}: align or upsert rows first")]
    MissingColumn { symbol1: String, symbol2: String },

    /// The window policy has no defined length for this resolution
    #[error("window sizing for {0} resolution is not supported")]
    UnsupportedResolution(Resolution),

    /// Invalid pair configuration
    #[error("invalid pair configuration: {0}")]
    InvalidConfig(String),

    /// Regression over a look-back window failed
    #[error(transparent)]
    Regression(#[from] RegressionError),
}
