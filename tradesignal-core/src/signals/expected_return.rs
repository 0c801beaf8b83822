//! Return signal: act when the expected return leaves a symmetric band.
//!
//! ```text
//! r = (forecast - price) / price
//! r >  threshold_value → buy
//! r < -threshold_value → sell
//! otherwise            → hold
//! ```
//!
//! Size comes from the request's sizer, then the optional min/max clamp.

use crate::config::EngineConfig;
use crate::domain::history::trailing;
use crate::domain::{Action, Signal};
use crate::request::{PositionSizing, ReturnRequest};
use crate::sizers::{FixedSizer, NormalizedSizer, ProportionalSizer, Sizer};

use super::{fmt_percent, SignalGenerator};

impl ReturnRequest {
    /// Trailing price window for volatility, or `None` when history is
    /// missing or shorter than `min_history_length`.
    pub fn volatility_window(&self, config: &EngineConfig) -> Option<&[f64]> {
        self.history
            .series(self.which_history)
            .filter(|values| values.len() >= self.min_history_length(config))
            .map(|values| trailing(values, self.window_history(config)))
    }

    pub fn sizer(&self, config: &EngineConfig) -> Box<dyn Sizer> {
        match self.position_sizing {
            PositionSizing::Fixed => Box::new(FixedSizer),
            PositionSizing::Proportional => Box::new(ProportionalSizer),
            PositionSizing::Normalized => {
                Box::new(NormalizedSizer::from_window(self.volatility_window(config)))
            }
        }
    }
}

impl SignalGenerator for ReturnRequest {
    fn generate(&self, config: &EngineConfig) -> Signal {
        let expected_return = self.market.expected_return();
        let threshold = self.threshold_value;

        let action = if expected_return > threshold {
            Action::Buy
        } else if expected_return < -threshold {
            Action::Sell
        } else {
            return Signal::hold(format!(
                "Expected return {} within threshold ±{}",
                fmt_percent(expected_return),
                fmt_percent(threshold)
            ));
        };

        let sizer = self.sizer(config);
        let size = self
            .bounds
            .clamp(sizer.size(self.execution_size(config), expected_return));

        Signal {
            action,
            size,
            reason: format!(
                "Expected return: {} (threshold: ±{}), position size: {size:.2}",
                fmt_percent(expected_return),
                fmt_percent(threshold)
            ),
        }
    }

    fn name(&self) -> &str {
        "return"
    }
}
