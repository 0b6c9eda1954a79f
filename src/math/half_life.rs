//! Mean-reversion half-life of a spread series.
//!
//! Models the spread as an Ornstein-Uhlenbeck process and estimates how
//! long a deviation takes to decay halfway back to the mean. Downstream
//! signal layers use this to judge whether a pair reverts fast enough to
//! trade.

/// Estimate the mean-reversion half-life of `spread`, in units of the
/// series' sampling interval.
///
/// Regresses the one-step change `spread[t] - spread[t-1]` on the lagged
/// level `spread[t-1]`; for a reverting series the coefficient `beta` is
/// negative and the half-life is `-ln(2) / beta`.
///
/// Returns `None` when the series is too short (< 3 points), the lagged
/// level is constant, or `beta >= 0` (no mean reversion to speak of).
pub fn half_life(spread: &[f64]) -> Option<f64> {
    if spread.len() < 3 {
        return None;
    }

    let n = spread.len() - 1;
    let lagged = &spread[..n];
    let mean_lag = lagged.iter().sum::<f64>() / n as f64;
    let mean_delta = spread
        .windows(2)
        .map(|w| w[1] - w[0])
        .sum::<f64>()
        / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let dx = spread[i] - mean_lag;
        let dy = (spread[i + 1] - spread[i]) - mean_delta;
        numerator += dx * dy;
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        return None;
    }

    let beta = numerator / denominator;
    if beta >= 0.0 {
        return None;
    }

    let hl = -(2.0f64.ln()) / beta;
    hl.is_finite().then_some(hl)
}
