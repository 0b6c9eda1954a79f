//! Configuration for a spread engine instance

use serde::{Deserialize, Serialize};

use crate::spread::error::SpreadError;
use crate::window::{Resolution, TradingCalendar};

/// Configuration for one pair-spread calculation.
///
/// Symbols are identifiers used only for labeling and equation text; the
/// resolution and calendar fix the regression window length at engine
/// construction and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    /// First symbol of the pair (the regression's dependent side)
    pub symbol1: String,

    /// Second symbol of the pair (the regressor)
    pub symbol2: String,

    /// Sampling resolution of the input bars
    #[serde(default = "default_resolution")]
    pub resolution: Resolution,

    /// Asset-class trading-calendar model
    #[serde(default = "default_calendar")]
    pub calendar: TradingCalendar,
}

fn default_resolution() -> Resolution {
    Resolution::Day
}

fn default_calendar() -> TradingCalendar {
    TradingCalendar::ExchangeHours
}

impl PairConfig {
    pub fn new(
        symbol1: impl Into<String>,
        symbol2: impl Into<String>,
        resolution: Resolution,
        calendar: TradingCalendar,
    ) -> Self {
        Self {
            symbol1: symbol1.into(),
            symbol2: symbol2.into(),
            resolution,
            calendar,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SpreadError> {
        if self.symbol1.trim().is_empty() || self.symbol2.trim().is_empty() {
            return Err(SpreadError::InvalidConfig(
                "symbols cannot be empty".to_string(),
            ));
        }
        if self.symbol1 == self.symbol2 {
            return Err(SpreadError::InvalidConfig(format!(
                "a pair needs two distinct symbols, got {} twice",
                self.symbol1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = PairConfig::new(
            "DASH-USDT",
            "ALGO-USDT",
            Resolution::Hour,
            TradingCalendar::AlwaysOn,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_symbol_invalid() {
        let config = PairConfig::new("", "ALGO-USDT", Resolution::Day, TradingCalendar::AlwaysOn);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identical_symbols_invalid() {
        let config = PairConfig::new(
            "AAPL",
            "AAPL",
            Resolution::Day,
            TradingCalendar::ExchangeHours,
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: PairConfig =
            serde_json::from_str(r#"{"symbol1": "AAPL", "symbol2": "ABBV"}"#).unwrap();
        assert_eq!(config.resolution, Resolution::Day);
        assert_eq!(config.calendar, TradingCalendar::ExchangeHours);
        assert!(config.validate().is_ok());
    }
}
