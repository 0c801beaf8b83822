//! Threshold calculation for the threshold strategy.
//!
//! Turns `threshold_type` + `threshold_value` into a price-distance trigger.
//! Volatility-based modes need history; when it is missing or too short they
//! fall back to the absolute value instead of failing the request.

use tracing::warn;

use crate::domain::history::trailing;
use crate::domain::{HistorySeries, WhichHistory};
use crate::indicators::{std_dev, Atr};
use crate::request::ThresholdType;

/// Resolved threshold parameters for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCalculator {
    pub threshold_type: ThresholdType,
    pub threshold_value: f64,
    pub which_history: WhichHistory,
    pub window_history: usize,
    pub min_history_length: usize,
}

impl ThresholdCalculator {
    /// Trigger distance in price units.
    pub fn compute(&self, current_price: f64, history: &HistorySeries) -> f64 {
        match self.threshold_type {
            ThresholdType::Absolute => self.threshold_value,
            ThresholdType::Percentage => current_price * (self.threshold_value / 100.0),
            ThresholdType::StdDev => self.std_dev_threshold(history),
            ThresholdType::Atr => self.atr_threshold(history),
        }
    }

    fn std_dev_threshold(&self, history: &HistorySeries) -> f64 {
        match history.series(self.which_history) {
            Some(values) if values.len() >= self.min_history_length => {
                self.threshold_value * std_dev(trailing(values, self.window_history))
            }
            other => {
                warn!(
                    which_history = %self.which_history,
                    history_len = other.map_or(0, <[f64]>::len),
                    min_history_length = self.min_history_length,
                    "insufficient history for std_dev threshold, falling back to absolute"
                );
                self.threshold_value
            }
        }
    }

    fn atr_threshold(&self, history: &HistorySeries) -> f64 {
        let Some(ohlc) = history.ohlc() else {
            warn!("missing OHLC data for ATR threshold, falling back to absolute");
            return self.threshold_value;
        };
        if ohlc.min_len() < self.min_history_length {
            warn!(
                history_len = ohlc.min_len(),
                min_history_length = self.min_history_length,
                "insufficient OHLC history for ATR threshold, falling back to absolute"
            );
            return self.threshold_value;
        }
        let atr = Atr::new(self.window_history.max(1), self.min_history_length).compute(&ohlc);
        self.threshold_value * atr
    }
}
