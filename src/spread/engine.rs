//! Rolling-window spread engine.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::math::{ols_regression, OlsFit};
use crate::spread::config::PairConfig;
use crate::spread::error::SpreadError;
use crate::spread::table::{AlignedRow, AlignedSeriesTable, RowRegression};
use crate::types::{TimeSeries, TimeSeriesElement};

/// Tracks the rolling OLS relationship between one pair of price series.
///
/// The engine owns an [`AlignedSeriesTable`] and a window length frozen at
/// construction from the pair's resolution and trading calendar. Two update
/// paths mutate the table: [`align`](Self::align) +
/// [`recompute_all`](Self::recompute_all) for bulk history, and
/// [`upsert`](Self::upsert) for streaming single-timestamp updates. Feeding
/// the same observations through either path yields the same table, so live
/// operation can be validated against a batch recompute.
///
/// Every regression at a timestamp is fitted over the `window_length` rows
/// strictly before it; data at or after a timestamp never influences that
/// timestamp's outputs.
///
/// Not internally synchronized: one instance per pair, callers serialize
/// access. Distinct instances share nothing and may run on separate threads.
#[derive(Debug, Clone)]
pub struct SpreadEngine {
    config: PairConfig,
    window_length: usize,
    table: AlignedSeriesTable,
}

impl SpreadEngine {
    /// Build an engine for one pair. Fails on an invalid config or a
    /// resolution the window policy does not support (tick).
    pub fn new(config: PairConfig) -> Result<Self, SpreadError> {
        config.validate()?;
        let window_length = config.calendar.window_length(config.resolution)?;
        info!(
            symbol1 = %config.symbol1,
            symbol2 = %config.symbol2,
            resolution = %config.resolution,
            window = window_length,
            "spread engine initialized"
        );
        Ok(Self {
            config,
            window_length,
            table: AlignedSeriesTable::new(),
        })
    }

    /// Number of trailing observations each regression is fitted over.
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    pub fn config(&self) -> &PairConfig {
        &self.config
    }

    /// The engine's aligned table, ordered by timestamp ascending.
    pub fn table(&self) -> &AlignedSeriesTable {
        &self.table
    }

    /// Replace the table with one built from two pairwise timestamp-aligned
    /// series (series1 becomes `value1`, series2 becomes `value2`).
    ///
    /// Both series must have the same length and matching timestamps at every
    /// position; validation runs before any mutation, so a failed call leaves
    /// prior state untouched. Rows with a NaN or infinite value on either
    /// side are dropped (logged at WARN, counted in the return value), never
    /// kept with placeholder values. No regression fields are populated here.
    pub fn align(
        &mut self,
        series1: &TimeSeries,
        series2: &TimeSeries,
    ) -> Result<usize, SpreadError> {
        if series1.len() != series2.len() {
            return Err(SpreadError::LengthMismatch {
                left: series1.len(),
                right: series2.len(),
            });
        }
        for (index, (elem1, elem2)) in series1.iter().zip(series2.iter()).enumerate() {
            if elem1.timestamp != elem2.timestamp {
                return Err(SpreadError::TimestampMismatch {
                    index,
                    left: elem1.timestamp,
                    right: elem2.timestamp,
                });
            }
        }

        let mut table = AlignedSeriesTable::new();
        let mut dropped = 0usize;
        for (elem1, elem2) in series1.iter().zip(series2.iter()) {
            if !elem1.value.is_finite() || !elem2.value.is_finite() {
                warn!(
                    timestamp = %elem1.timestamp,
                    value1 = elem1.value,
                    value2 = elem2.value,
                    "dropping row with non-numeric value"
                );
                dropped += 1;
                continue;
            }
            table.insert(elem1.timestamp, AlignedRow::new(elem1.value, elem2.value));
        }

        info!(
            symbol1 = %self.config.symbol1,
            symbol2 = %self.config.symbol2,
            rows = table.len(),
            dropped,
            "aligned input series"
        );
        self.table = table;
        Ok(dropped)
    }

    /// Recompute regression fields for every row with a full look-back
    /// window, overwriting whatever was there. Idempotent.
    ///
    /// The row at ascending position `i` is fitted over positions
    /// `i - window_length .. i`, current row excluded. Rows with less
    /// history keep no regression state.
    pub fn recompute_all(&mut self) -> Result<(), SpreadError> {
        if self.table.is_empty() {
            return Err(SpreadError::MissingColumn {
                symbol1: self.config.symbol1.clone(),
                symbol2: self.config.symbol2.clone(),
            });
        }

        let timestamps: Vec<DateTime<Utc>> = self.table.timestamps().copied().collect();
        let values1: Vec<f64> = self.table.iter().map(|(_, row)| row.value1).collect();
        let values2: Vec<f64> = self.table.iter().map(|(_, row)| row.value2).collect();

        let window = self.window_length;
        let mut computed = 0usize;
        for i in window..timestamps.len() {
            let fit = ols_regression(&values1[i - window..i], &values2[i - window..i])?;
            let regression = self.regression_for(&fit, values1[i], values2[i]);
            if let Some(row) = self.table.get_mut(timestamps[i]) {
                row.regression = Some(regression);
                computed += 1;
            }
        }

        info!(
            rows = timestamps.len(),
            computed,
            window,
            "recomputed regression columns"
        );
        Ok(())
    }

    /// Insert or update a single timestamp's observation.
    ///
    /// Both elements must carry the same timestamp. A non-finite value on
    /// either side removes the row (non-fatal, logged at WARN). Regression
    /// fields are then computed for this timestamp only if they are not
    /// already present and at least `window_length` strictly-earlier rows
    /// exist; the fit uses the trailing `window_length` rows before this
    /// timestamp, exactly as [`recompute_all`](Self::recompute_all) would.
    pub fn upsert(
        &mut self,
        elem1: &TimeSeriesElement,
        elem2: &TimeSeriesElement,
    ) -> Result<(), SpreadError> {
        if elem1.timestamp != elem2.timestamp {
            return Err(SpreadError::TimestampMismatch {
                index: 0,
                left: elem1.timestamp,
                right: elem2.timestamp,
            });
        }
        let timestamp = elem1.timestamp;

        if !elem1.value.is_finite() || !elem2.value.is_finite() {
            warn!(
                %timestamp,
                value1 = elem1.value,
                value2 = elem2.value,
                "dropping row with non-numeric value"
            );
            self.table.remove(timestamp);
            return Ok(());
        }

        self.table
            .upsert_values(timestamp, elem1.value, elem2.value);

        // Already computed for this timestamp: nothing left to do.
        if self
            .table
            .row(timestamp)
            .is_some_and(|row| row.regression.is_some())
        {
            return Ok(());
        }

        let earlier = self.table.before(timestamp).count();
        if earlier < self.window_length {
            debug!(
                %timestamp,
                earlier,
                window = self.window_length,
                "insufficient history, regression deferred"
            );
            return Ok(());
        }

        let mut window1 = Vec::with_capacity(self.window_length);
        let mut window2 = Vec::with_capacity(self.window_length);
        for (_, row) in self
            .table
            .before(timestamp)
            .skip(earlier - self.window_length)
        {
            window1.push(row.value1);
            window2.push(row.value2);
        }

        let fit = ols_regression(&window1, &window2)?;
        let regression = self.regression_for(&fit, elem1.value, elem2.value);
        if let Some(row) = self.table.get_mut(timestamp) {
            row.regression = Some(regression);
        }
        Ok(())
    }

    /// Timestamp-ordered computed spreads.
    pub fn spreads(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.table
            .iter()
            .filter_map(|(timestamp, row)| {
                row.regression
                    .as_ref()
                    .map(|regression| (*timestamp, regression.spread))
            })
            .collect()
    }

    /// Spread of the most recent row with regression state.
    pub fn latest_spread(&self) -> Option<f64> {
        self.table
            .iter()
            .rev()
            .find_map(|(_, row)| row.regression.as_ref().map(|r| r.spread))
    }

    /// Equation of the most recent row with regression state.
    pub fn latest_equation(&self) -> Option<&str> {
        self.table
            .iter()
            .rev()
            .find_map(|(_, row)| row.regression.as_ref().map(|r| r.equation.as_str()))
    }

    /// Shared derivation for both update paths: one code path keeps the
    /// bulk and incremental results identical.
    fn regression_for(&self, fit: &OlsFit, value1: f64, value2: f64) -> RowRegression {
        let spread = value1 - (fit.slope * value2 + fit.intercept);
        let equation = format!(
            "spread = {} - ({} * {} + {})",
            self.config.symbol1, fit.slope, self.config.symbol2, fit.intercept
        );
        RowRegression {
            slope: fit.slope,
            intercept: fit.intercept,
            spread,
            equation,
        }
    }
}
