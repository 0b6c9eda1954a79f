//! Timestamp-keyed table of aligned pair observations.
//!
//! Fixed-schema replacement for a dynamic dataframe: every row holds both
//! symbols' values, and regression outputs live behind a single `Option`
//! so a row either carries all of slope/intercept/spread/equation or none
//! of them.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Regression outputs for one timestamp, populated as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRegression {
    /// Hedge ratio fitted over the trailing window.
    pub slope: f64,
    /// Constant offset fitted over the trailing window.
    pub intercept: f64,
    /// Residual: `value1 - (slope * value2 + intercept)`.
    pub spread: f64,
    /// Human-readable form of the fitted relationship.
    pub equation: String,
}

/// One aligned observation of the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// First symbol's value at this timestamp.
    pub value1: f64,
    /// Second symbol's value at this timestamp.
    pub value2: f64,
    /// Rolling regression outputs, absent until enough history exists.
    pub regression: Option<RowRegression>,
}

impl AlignedRow {
    pub fn new(value1: f64, value2: f64) -> Self {
        Self {
            value1,
            value2,
            regression: None,
        }
    }
}

/// Mapping from timestamp to [`AlignedRow`], iterated in ascending
/// timestamp order. Timestamps are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeriesTable {
    rows: BTreeMap<DateTime<Utc>, AlignedRow>,
}

impl AlignedSeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, timestamp: DateTime<Utc>) -> Option<&AlignedRow> {
        self.rows.get(&timestamp)
    }

    /// Rows in ascending timestamp order.
    pub fn iter(&self) -> btree_map::Iter<'_, DateTime<Utc>, AlignedRow> {
        self.rows.iter()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.rows.keys()
    }

    /// Rows with timestamp strictly before `timestamp`, ascending.
    pub fn before(
        &self,
        timestamp: DateTime<Utc>,
    ) -> btree_map::Range<'_, DateTime<Utc>, AlignedRow> {
        self.rows
            .range((Bound::Unbounded, Bound::Excluded(timestamp)))
    }

    /// Most recent row, if any.
    pub fn last(&self) -> Option<(&DateTime<Utc>, &AlignedRow)> {
        self.rows.iter().next_back()
    }

    pub(crate) fn insert(&mut self, timestamp: DateTime<Utc>, row: AlignedRow) {
        self.rows.insert(timestamp, row);
    }

    /// Insert a new row or overwrite an existing row's values. Existing
    /// regression state is left in place.
    pub(crate) fn upsert_values(&mut self, timestamp: DateTime<Utc>, value1: f64, value2: f64) {
        self.rows
            .entry(timestamp)
            .and_modify(|row| {
                row.value1 = value1;
                row.value2 = value2;
            })
            .or_insert_with(|| AlignedRow::new(value1, value2));
    }

    pub(crate) fn remove(&mut self, timestamp: DateTime<Utc>) -> Option<AlignedRow> {
        self.rows.remove(&timestamp)
    }

    pub(crate) fn get_mut(&mut self, timestamp: DateTime<Utc>) -> Option<&mut AlignedRow> {
        self.rows.get_mut(&timestamp)
    }
}

impl<'a> IntoIterator for &'a AlignedSeriesTable {
    type Item = (&'a DateTime<Utc>, &'a AlignedRow);
    type IntoIter = btree_map::Iter<'a, DateTime<Utc>, AlignedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
