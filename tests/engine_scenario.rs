//! End-to-end scenarios for the spread engine: batch recompute, streaming
//! upsert, and the equivalence between the two.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pairspread::math::half_life;
use pairspread::spread::{PairConfig, SpreadEngine};
use pairspread::types::{TimeSeries, TimeSeriesElement};
use pairspread::window::{Resolution, TradingCalendar};

const WINDOW: usize = 126; // exchange-hours policy at daily resolution

fn day(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap() + Duration::days(i as i64)
}

fn engine() -> SpreadEngine {
    SpreadEngine::new(PairConfig::new(
        "AAPL",
        "ABBV",
        Resolution::Day,
        TradingCalendar::ExchangeHours,
    ))
    .unwrap()
}

/// Deterministic pseudo-noise in roughly [-0.5, 0.5).
fn noise(i: usize, salt: usize) -> f64 {
    (((i * 2654435761 + salt * 40503) >> 3) % 1000) as f64 / 1000.0 - 0.5
}

/// A co-moving pair: value1 tracks 1.8 * value2 + 12 with small noise.
fn cointegrated_pair(n: usize) -> (TimeSeries, TimeSeries) {
    let series2: TimeSeries = (0..n)
        .map(|i| (day(i), 100.0 + (i as f64 * 0.15) + noise(i, 1)))
        .collect();
    let series1: TimeSeries = series2
        .iter()
        .enumerate()
        .map(|(i, elem)| (elem.timestamp, 1.8 * elem.value + 12.0 + noise(i, 2) * 0.3))
        .collect();
    (series1, series2)
}

/// Relative comparison at 1e-9, floored for values near zero.
fn assert_close(a: f64, b: f64, what: &str) {
    let scale = a.abs().max(b.abs()).max(1.0);
    assert!(
        (a - b).abs() <= 1e-9 * scale,
        "{}: {} vs {} differ beyond tolerance",
        what,
        a,
        b
    );
}

#[test]
fn three_hundred_daily_bars_populate_exactly_174_rows() {
    let (series1, series2) = cointegrated_pair(300);
    let mut engine = engine();
    engine.align(&series1, &series2).unwrap();
    engine.recompute_all().unwrap();

    let computed: Vec<_> = engine
        .table()
        .iter()
        .filter(|(_, row)| row.regression.is_some())
        .collect();
    assert_eq!(computed.len(), 174);

    // Positions 0..125 have insufficient history, 126..299 are populated
    for i in 0..300 {
        let row = engine.table().row(day(i)).unwrap();
        assert_eq!(
            row.regression.is_some(),
            i >= WINDOW,
            "row {} population is wrong",
            i
        );
    }
}

#[test]
fn streaming_upserts_match_batch_recompute() {
    let n = 220;
    let (series1, series2) = cointegrated_pair(n);

    let mut batch = engine();
    batch.align(&series1, &series2).unwrap();
    batch.recompute_all().unwrap();

    let mut streaming = engine();
    for (elem1, elem2) in series1.iter().zip(series2.iter()) {
        streaming.upsert(elem1, elem2).unwrap();
    }

    assert_eq!(batch.table().len(), streaming.table().len());
    for ((ts_b, row_b), (ts_s, row_s)) in batch.table().iter().zip(streaming.table().iter()) {
        assert_eq!(ts_b, ts_s);
        assert_eq!(row_b.value1, row_s.value1);
        assert_eq!(row_b.value2, row_s.value2);
        match (&row_b.regression, &row_s.regression) {
            (None, None) => {}
            (Some(b), Some(s)) => {
                assert_close(b.slope, s.slope, "slope");
                assert_close(b.intercept, s.intercept, "intercept");
                assert_close(b.spread, s.spread, "spread");
                assert_eq!(b.equation, s.equation);
            }
            _ => panic!("regression population differs at {}", ts_b),
        }
    }
}

#[test]
fn streaming_upserts_match_batch_when_rows_are_dropped() {
    let n = 200;
    let (mut raw1, series2) = cointegrated_pair(n);

    // Poison a few observations; both paths must drop the same rows
    let mut series1 = TimeSeries::new();
    for (i, elem) in raw1.iter().enumerate() {
        let value = if i == 40 || i == 150 { f64::NAN } else { elem.value };
        series1.push(TimeSeriesElement::new(elem.timestamp, value));
    }
    raw1 = series1;

    let mut batch = engine();
    let dropped = batch.align(&raw1, &series2).unwrap();
    assert_eq!(dropped, 2);
    batch.recompute_all().unwrap();

    let mut streaming = engine();
    for (elem1, elem2) in raw1.iter().zip(series2.iter()) {
        streaming.upsert(elem1, elem2).unwrap();
    }

    assert_eq!(batch.table().len(), n - 2);
    assert_eq!(batch.table().len(), streaming.table().len());
    for ((ts_b, row_b), (ts_s, row_s)) in batch.table().iter().zip(streaming.table().iter()) {
        assert_eq!(ts_b, ts_s);
        match (&row_b.regression, &row_s.regression) {
            (None, None) => {}
            (Some(b), Some(s)) => {
                assert_close(b.slope, s.slope, "slope");
                assert_close(b.intercept, s.intercept, "intercept");
                assert_close(b.spread, s.spread, "spread");
            }
            _ => panic!("regression population differs at {}", ts_b),
        }
    }
}

#[test]
fn appending_new_bars_never_rewrites_history() {
    let n = 180;
    let (series1, series2) = cointegrated_pair(n + 40);

    let head1: TimeSeries = series1.iter().take(n).copied().collect();
    let head2: TimeSeries = series2.iter().take(n).copied().collect();

    let mut engine = engine();
    engine.align(&head1, &head2).unwrap();
    engine.recompute_all().unwrap();
    let history = engine.table().clone();

    for (elem1, elem2) in series1.iter().zip(series2.iter()).skip(n) {
        engine.upsert(elem1, elem2).unwrap();
    }

    // Every pre-existing row is bit-identical: later data cannot reach back
    for (timestamp, old_row) in history.iter() {
        assert_eq!(engine.table().row(*timestamp).unwrap(), old_row);
    }
    assert_eq!(engine.table().len(), n + 40);
}

#[test]
fn equation_text_names_both_symbols() {
    let (series1, series2) = cointegrated_pair(WINDOW + 1);
    let mut engine = engine();
    engine.align(&series1, &series2).unwrap();
    engine.recompute_all().unwrap();

    let equation = engine.latest_equation().unwrap();
    assert!(equation.starts_with("spread = AAPL - ("));
    assert!(equation.contains("* ABBV +"));
    assert!(equation.ends_with(')'));
}

#[test]
fn cointegrated_pair_spread_is_mean_reverting() {
    let (series1, series2) = cointegrated_pair(300);
    let mut engine = engine();
    engine.align(&series1, &series2).unwrap();
    engine.recompute_all().unwrap();

    // The residual of a genuinely co-moving pair should revert quickly
    let spreads: Vec<f64> = engine.spreads().into_iter().map(|(_, s)| s).collect();
    let hl = half_life(&spreads).expect("cointegrated spread should mean-revert");
    assert!(hl > 0.0 && hl < 10.0, "expected short half-life, got {}", hl);
}

#[test]
fn crypto_hourly_engine_uses_always_on_window() {
    let engine = SpreadEngine::new(PairConfig::new(
        "DASH-USDT",
        "ALGO-USDT",
        Resolution::Hour,
        TradingCalendar::AlwaysOn,
    ))
    .unwrap();
    assert_eq!(engine.window_length(), 4392);
}
