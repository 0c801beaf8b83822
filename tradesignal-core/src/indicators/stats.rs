//! Window statistics: mean, population stddev, simple returns, empirical rank.
//!
//! Stddev divides by N (population), matching the volatility convention used
//! for both std-dev thresholds and normalized sizing.

/// Arithmetic mean; 0.0 for an empty window.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty window.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Simple returns `(p[i] - p[i-1]) / p[i-1]`; one shorter than the input,
/// empty for fewer than two prices.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Share of `window` strictly below `value`, in percent (0..=100).
/// 0.0 for an empty window.
pub fn percentile_rank(window: &[f64], value: f64) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let below = window.iter().filter(|&&v| v < value).count();
    below as f64 / window.len() as f64 * 100.0
}
