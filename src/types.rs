//! Common Types Module
//!
//! Shared time-series types used across the codebase. These are the
//! external-facing input format: collaborators that fetch market data
//! hand the engine plain ordered `(timestamp, value)` sequences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped observation, e.g. one bar's close price.
///
/// Two elements are equal iff both timestamp and value match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesElement {
    /// Observation timestamp (bar close time).
    pub timestamp: DateTime<Utc>,
    /// Observed value (e.g. close price).
    pub value: f64,
}

impl TimeSeriesElement {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl std::fmt::Display for TimeSeriesElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.value, self.timestamp)
    }
}

/// An ordered sequence of [`TimeSeriesElement`]s.
///
/// Order is insertion order: callers are expected to supply chronological
/// data, the engine does not re-sort. Equality is element-wise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    elements: Vec<TimeSeriesElement>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, preserving insertion order.
    pub fn push(&mut self, element: TimeSeriesElement) {
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Positional access.
    pub fn get(&self, index: usize) -> Option<&TimeSeriesElement> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSeriesElement> {
        self.elements.iter()
    }
}

impl FromIterator<TimeSeriesElement> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = TimeSeriesElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(DateTime<Utc>, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (DateTime<Utc>, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(timestamp, value)| TimeSeriesElement::new(timestamp, value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeSeriesElement;
    type IntoIter = std::slice::Iter<'a, TimeSeriesElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
