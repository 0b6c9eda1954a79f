//! Windowed-Regression Spread Module
//!
//! Tracks the statistical relationship between two co-moving price series
//! for pairs trading: at each timestamp, a rolling OLS regression over the
//! trailing window yields the hedge ratio (slope), intercept, and residual
//! spread. All fits use history strictly prior to the timestamp being
//! evaluated, so the output is safe to backtest against.
//!
//! # Example
//!
//! ```ignore
//! use pairspread::spread::{PairConfig, SpreadEngine};
//! use pairspread::window::{Resolution, TradingCalendar};
//!
//! let config = PairConfig::new("DASH-USDT", "ALGO-USDT", Resolution::Hour, TradingCalendar::AlwaysOn);
//! let mut engine = SpreadEngine::new(config)?;
//! engine.align(&series1, &series2)?;
//! engine.recompute_all()?;
//! // thereafter, stream bars in one timestamp at a time:
//! engine.upsert(&bar1, &bar2)?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod table;

pub use config::PairConfig;
pub use engine::SpreadEngine;
pub use error::SpreadError;
pub use table::{AlignedRow, AlignedSeriesTable, RowRegression};
