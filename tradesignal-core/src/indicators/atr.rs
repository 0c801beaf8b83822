//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR here is the simple mean of True Range over the trailing window, so a
//! window of N bars yields N-1 true ranges (the first bar has no previous close).

use crate::domain::history::{trailing, Ohlc};

use super::stats::mean;

/// Windowed ATR with a minimum-history guard.
#[derive(Debug, Clone)]
pub struct Atr {
    window: usize,
    min_history_length: usize,
}

impl Atr {
    pub fn new(window: usize, min_history_length: usize) -> Self {
        assert!(window >= 1, "ATR window must be >= 1");
        Self {
            window,
            min_history_length,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// ATR over the trailing window, or 0.0 if history is too short.
    pub fn compute(&self, ohlc: &Ohlc<'_>) -> f64 {
        average_true_range(ohlc.high, ohlc.low, ohlc.close, self.window, self.min_history_length)
    }
}

/// True Range series for consecutive bars.
/// TR[i-1] = max(high[i]-low[i], |high[i]-close[i-1]|, |low[i]-close[i-1]|) for i >= 1.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = high.len().min(low.len()).min(close.len());
    (1..n)
        .map(|i| {
            let h = high[i];
            let l = low[i];
            let pc = close[i - 1];
            (h - l).max((h - pc).abs()).max((l - pc).abs())
        })
        .collect()
}

/// Mean True Range over the last `window` bars.
///
/// Returns 0.0 when any series is shorter than `min_history_length` or the
/// window holds fewer than two bars.
pub fn average_true_range(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    window: usize,
    min_history_length: usize,
) -> f64 {
    if high.len() < min_history_length
        || low.len() < min_history_length
        || close.len() < min_history_length
    {
        return 0.0;
    }

    let tr = true_range(
        trailing(high, window),
        trailing(low, window),
        trailing(close, window),
    );
    if tr.is_empty() {
        return 0.0;
    }
    mean(&tr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    struct Bars {
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    }

    fn make_ohlc(data: &[(f64, f64, f64, f64)]) -> Bars {
        Bars {
            open: data.iter().map(|b| b.0).collect(),
            high: data.iter().map(|b| b.1).collect(),
            low: data.iter().map(|b| b.2).collect(),
            close: data.iter().map(|b| b.3).collect(),
        }
    }

    impl Bars {
        fn view(&self) -> Ohlc<'_> {
            Ohlc {
                open: &self.open,
                high: &self.high,
                low: &self.low,
                close: &self.close,
            }
        }
    }

    #[test]
    fn true_range_basic() {
        let bars = make_ohlc(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&bars.high, &bars.low, &bars.close);
        assert_eq!(tr.len(), 2);
        assert_approx(tr[0], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[1], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: prev close 100, current bar 110-115-108
        let bars = make_ohlc(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, |115-100|, |108-100|) = 15
        ]);
        let tr = true_range(&bars.high, &bars.low, &bars.close);
        assert_approx(tr[0], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_is_mean_of_window() {
        let bars = make_ohlc(&[
            (100.0, 105.0, 95.0, 102.0),  // outside window
            (102.0, 108.0, 100.0, 106.0), // window start (no TR of its own)
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = max(6, 4, 2) = 6
        ]);
        let atr = Atr::new(3, 2);
        assert_approx(atr.compute(&bars.view()), 7.5, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_single_bar_window_is_zero() {
        let bars = make_ohlc(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
        ]);
        assert_eq!(Atr::new(1, 1).compute(&bars.view()), 0.0);
    }

    #[test]
    fn atr_short_history_is_zero() {
        let bars = make_ohlc(&[(100.0, 105.0, 95.0, 102.0)]);
        assert_eq!(Atr::new(14, 2).compute(&bars.view()), 0.0);
        assert_eq!(average_true_range(&[], &[], &[], 14, 0), 0.0);
    }

    #[test]
    fn atr_below_min_history_is_zero() {
        let bars = make_ohlc(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        assert_eq!(Atr::new(3, 5).compute(&bars.view()), 0.0);
        assert!(Atr::new(3, 3).compute(&bars.view()) > 0.0);
    }
}
