//! Regression window sizing per sampling resolution and trading calendar.
//!
//! A pair's rolling regression always spans roughly half a year of trading
//! history. How many observations that is depends on the bar resolution and
//! on how many hours per day the market actually trades, which differs by
//! asset class: US equities trade a 6.5-hour session, crypto trades around
//! the clock. Each calendar variant carries its own base window (half a year
//! of daily bars) and hours-per-day constant.

use serde::{Deserialize, Serialize};

use crate::spread::SpreadError;

/// Sampling resolution of the input bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Tick,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resolution::Tick => "tick",
            Resolution::Second => "second",
            Resolution::Minute => "minute",
            Resolution::Hour => "hour",
            Resolution::Day => "day",
            Resolution::Week => "week",
            Resolution::Month => "month",
        };
        write!(f, "{}", name)
    }
}

/// Trading-calendar model selecting the window-length policy variant.
///
/// Picked per asset class at engine construction; a configuration variant
/// rather than a trait hierarchy since the two only differ in constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingCalendar {
    /// Partial daily session (US equities / ETFs): 126 trading days per
    /// half year, 6.5 trading hours per day.
    ExchangeHours,
    /// Continuous market (crypto): 183 calendar days per half year,
    /// 24 hours per day.
    AlwaysOn,
}

impl TradingCalendar {
    /// Observations representing roughly half a year of daily bars.
    const fn base_window(self) -> usize {
        match self {
            TradingCalendar::ExchangeHours => 126,
            TradingCalendar::AlwaysOn => 183,
        }
    }

    /// Trading hours per day, used to scale intraday resolutions.
    const fn trading_hours_per_day(self) -> f64 {
        match self {
            TradingCalendar::ExchangeHours => 6.5,
            TradingCalendar::AlwaysOn => 24.0,
        }
    }

    /// Number of observations one regression window spans at the given
    /// resolution.
    ///
    /// Week and month use fixed multipliers (7, 30) rather than true
    /// trading-day counts; a documented business rule carried over from the
    /// daily approximation. Intraday counts are truncated to an integer.
    /// Tick data has no policy-defined window and is rejected.
    pub fn window_length(self, resolution: Resolution) -> Result<usize, SpreadError> {
        let base = self.base_window();
        let hours = self.trading_hours_per_day();
        match resolution {
            Resolution::Day => Ok(base),
            Resolution::Week => Ok(base * 7),
            Resolution::Month => Ok(base * 30),
            Resolution::Hour => Ok((base as f64 * hours) as usize),
            Resolution::Minute => Ok((base as f64 * hours * 60.0) as usize),
            Resolution::Second => Ok((base as f64 * hours * 3600.0) as usize),
            Resolution::Tick => Err(SpreadError::UnsupportedResolution(resolution)),
        }
    }
}
