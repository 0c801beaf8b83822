//! Volatility-Normalized Position Sizer
//!
//! Position size scaled by expected return relative to recent return volatility.
//!
//! # Formula
//! ```text
//! returns    = simple returns of the trailing price window
//! volatility = population stddev(returns)
//! quantity   = base_size * |expected_return| / volatility
//! ```
//!
//! Without usable volatility (no window, fewer than two prices, or a flat
//! window) the sizer degrades to fixed sizing.

use tracing::warn;

use crate::indicators::{simple_returns, std_dev};
use crate::sizers::Sizer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSizer {
    /// Stddev of simple returns over the window, if it could be measured.
    return_volatility: Option<f64>,
}

impl NormalizedSizer {
    /// Measure return volatility over a trailing price window.
    /// `None` means the caller had insufficient history.
    pub fn from_window(window: Option<&[f64]>) -> Self {
        let return_volatility = window.and_then(|prices| {
            let returns = simple_returns(prices);
            if returns.is_empty() {
                None
            } else {
                Some(std_dev(&returns))
            }
        });
        Self { return_volatility }
    }

    pub fn with_volatility(return_volatility: f64) -> Self {
        Self {
            return_volatility: Some(return_volatility),
        }
    }

    pub fn return_volatility(&self) -> Option<f64> {
        self.return_volatility
    }

    /// `|expected_return| / volatility`, or `None` when volatility is unusable.
    pub fn scale(&self, expected_return: f64) -> Option<f64> {
        match self.return_volatility {
            Some(vol) if vol > 0.0 => Some(expected_return.abs() / vol),
            _ => None,
        }
    }
}

impl Sizer for NormalizedSizer {
    fn size(&self, base_size: f64, expected_return: f64) -> f64 {
        match self.scale(expected_return) {
            Some(scale) => base_size * scale,
            None => {
                warn!(
                    volatility = ?self.return_volatility,
                    "no usable return volatility for normalized sizing, falling back to fixed"
                );
                base_size
            }
        }
    }

    fn name(&self) -> &str {
        "normalized"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_by_volatility() {
        let sizer = NormalizedSizer::with_volatility(0.02);
        // 10 * 0.10 / 0.02 = 50
        let qty = sizer.size(10.0, 0.10);
        assert!((qty - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_window_falls_back_to_fixed() {
        let sizer = NormalizedSizer::from_window(Some(&[100.0, 100.0, 100.0]));
        assert_eq!(sizer.return_volatility(), Some(0.0));
        assert_eq!(sizer.size(10.0, 0.10), 10.0);
    }

    #[test]
    fn test_missing_window_falls_back_to_fixed() {
        let sizer = NormalizedSizer::from_window(None);
        assert_eq!(sizer.return_volatility(), None);
        assert_eq!(sizer.size(7.0, 0.30), 7.0);
    }

    #[test]
    fn test_single_price_has_no_volatility() {
        let sizer = NormalizedSizer::from_window(Some(&[100.0]));
        assert_eq!(sizer.return_volatility(), None);
    }

    #[test]
    fn test_from_window_measures_returns() {
        // returns: +10%, -10% → mean 0, population stddev 0.1
        let sizer = NormalizedSizer::from_window(Some(&[100.0, 110.0, 99.0]));
        let vol = sizer.return_volatility().unwrap();
        assert!((vol - 0.1).abs() < 1e-12);
    }
}
