//! Quantile signal: rank the forecast within recent history and act on the
//! first configured band containing that rank.
//!
//! ```text
//! window     = last window_history points of the selected series
//! percentile = count(window < forecast) / len(window) * 100
//! buy  size  = multiplier * cash / price   (optionally volatility-scaled)
//! sell size  = multiplier * position
//! ```

use crate::config::EngineConfig;
use crate::domain::history::trailing;
use crate::domain::{Action, Signal};
use crate::indicators::percentile_rank;
use crate::request::{QuantileRequest, QuantileSizing};
use crate::sizers::{FixedSizer, NormalizedSizer, Sizer};

use super::SignalGenerator;

/// Empirical percentile (0..=100) of `forecast` within `window`.
pub fn percentile(window: &[f64], forecast: f64) -> f64 {
    percentile_rank(window, forecast)
}

impl QuantileRequest {
    /// Trailing window of the selected series; empty if it was not supplied.
    pub fn window(&self) -> &[f64] {
        self.history
            .series(self.which_history)
            .map(|values| trailing(values, self.window_history))
            .unwrap_or_default()
    }
}

impl SignalGenerator for QuantileRequest {
    fn generate(&self, config: &EngineConfig) -> Signal {
        let min_history_length = self.min_history_length(config);
        let window = self.window();
        if window.len() < min_history_length {
            return Signal::hold(format!(
                "Insufficient history for quantile calculation (need at least {min_history_length})"
            ));
        }

        let pct = percentile(window, self.market.forecast_price);

        let Some(band) = self.quantile_signals.first_match(pct) else {
            return Signal::hold(format!(
                "Forecast percentile {pct:.1} does not match any quantile signal range"
            ));
        };

        if band.signal != Action::Hold && band.multiplier == 0.0 {
            return Signal::hold(format!(
                "Signal {} for percentile {pct:.1} has multiplier 0.0, nothing to trade",
                band.signal
            ));
        }

        let size = match band.signal {
            Action::Buy => {
                let base = self.market.max_affordable() * band.multiplier;
                let sizer: Box<dyn Sizer> = match self.position_sizing {
                    QuantileSizing::Fixed => Box::new(FixedSizer),
                    QuantileSizing::Normalized => Box::new(NormalizedSizer::from_window(Some(window))),
                };
                sizer.size(base, self.market.expected_return())
            }
            Action::Sell => self.market.current_position * band.multiplier,
            Action::Hold => {
                return Signal::hold(format!("Signal action is hold for percentile {pct:.1}"));
            }
        };

        Signal {
            action: band.signal,
            size: self.bounds.clamp(size),
            reason: format!(
                "Forecast percentile {pct:.1} in range [{}, {}], signal: {}, multiplier: {:?}",
                band.min(),
                band.max(),
                band.signal,
                band.multiplier
            ),
        }
    }

    fn name(&self) -> &str {
        "quantile"
    }
}
