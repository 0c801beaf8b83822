//! Threshold signal: trade a fixed size when the forecast moves far enough.
//!
//! ```text
//! diff      = forecast - price
//! magnitude = |diff|
//! magnitude <  threshold → hold
//! diff > 0               → buy  execution_size
//! diff < 0               → sell execution_size
//! ```

use crate::config::EngineConfig;
use crate::domain::Signal;
use crate::request::ThresholdRequest;
use crate::threshold::ThresholdCalculator;

use super::SignalGenerator;

impl ThresholdRequest {
    pub fn calculator(&self, config: &EngineConfig) -> ThresholdCalculator {
        ThresholdCalculator {
            threshold_type: self.threshold_type,
            threshold_value: self.threshold_value,
            which_history: self.which_history,
            window_history: self.window_history(config),
            min_history_length: self.min_history_length(config),
        }
    }
}

impl SignalGenerator for ThresholdRequest {
    fn generate(&self, config: &EngineConfig) -> Signal {
        let forecast = self.market.forecast_price;
        let price = self.market.current_price;
        let threshold = self
            .calculator(config)
            .compute(price, &self.history);

        let diff = forecast - price;
        let magnitude = diff.abs();

        if magnitude < threshold {
            return Signal::hold(format!(
                "Signal {magnitude:.4} below threshold {threshold:.4}"
            ));
        }

        let size = self.execution_size(config);
        if diff > 0.0 {
            Signal::buy(
                size,
                format!(
                    "Forecast {forecast:.2} > Price {price:.2}, magnitude {magnitude:.4} > threshold {threshold:.4}"
                ),
            )
        } else if diff < 0.0 {
            Signal::sell(
                size,
                format!(
                    "Forecast {forecast:.2} < Price {price:.2}, magnitude {magnitude:.4} > threshold {threshold:.4}"
                ),
            )
        } else {
            Signal::hold(format!("Forecast {forecast:.2} equals price, no direction"))
        }
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, HistorySeries, MarketState, WhichHistory};
    use crate::request::ThresholdType;

    fn request(forecast: f64, threshold_type: ThresholdType, value: f64) -> ThresholdRequest {
        ThresholdRequest {
            market: MarketState {
                forecast_price: forecast,
                current_price: 100.0,
                current_position: 10.0,
                available_cash: 10_000.0,
                initial_capital: 10_000.0,
            },
            threshold_type,
            threshold_value: value,
            execution_size: Some(100.0),
            which_history: WhichHistory::Close,
            window_history: None,
            min_history_length: None,
            history: HistorySeries::default(),
        }
    }

    #[test]
    fn zero_threshold_buys_on_any_rise() {
        let signal = request(105.0, ThresholdType::Absolute, 0.0).generate(&EngineConfig::default());
        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.size, 100.0);
        assert_eq!(
            signal.reason,
            "Forecast 105.00 > Price 100.00, magnitude 5.0000 > threshold 0.0000"
        );
    }

    #[test]
    fn zero_threshold_sells_on_any_drop() {
        let signal = request(99.5, ThresholdType::Absolute, 0.0).generate(&EngineConfig::default());
        assert_eq!(signal.action, Action::Sell);
        assert_eq!(signal.size, 100.0);
    }

    #[test]
    fn below_threshold_holds() {
        let signal = request(101.0, ThresholdType::Absolute, 2.0).generate(&EngineConfig::default());
        assert_eq!(signal.action, Action::Hold);
        assert_eq!(signal.size, 0.0);
        assert_eq!(signal.reason, "Signal 1.0000 below threshold 2.0000");
    }

    #[test]
    fn magnitude_equal_to_threshold_trades() {
        let signal = request(102.0, ThresholdType::Absolute, 2.0).generate(&EngineConfig::default());
        assert_eq!(signal.action, Action::Buy);
    }

    #[test]
    fn percentage_threshold() {
        // 3% of 100 = 3
        let config = EngineConfig::default();
        assert_eq!(request(102.0, ThresholdType::Percentage, 3.0).generate(&config).action, Action::Hold);
        assert_eq!(request(96.0, ThresholdType::Percentage, 3.0).generate(&config).action, Action::Sell);
    }

    #[test]
    fn flat_forecast_with_zero_threshold_holds() {
        let signal = request(100.0, ThresholdType::Absolute, 0.0).generate(&EngineConfig::default());
        assert_eq!(signal.action, Action::Hold);
        assert_eq!(signal.size, 0.0);
    }

    #[test]
    fn execution_size_defaults_from_config() {
        let mut r = request(105.0, ThresholdType::Absolute, 0.0);
        r.execution_size = None;
        let config = EngineConfig {
            default_execution_size: 3.0,
            ..EngineConfig::default()
        };
        assert_eq!(r.generate(&config).size, 3.0);
    }
}
