//! Market state: the fields every strategy request carries.

use serde::{Deserialize, Serialize};

use super::result::ExecutionResult;

/// Price, forecast, and the caller-owned cash/position pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub forecast_price: f64,
    pub current_price: f64,
    pub current_position: f64,
    pub available_cash: f64,
    pub initial_capital: f64,
}

impl MarketState {
    /// No cash and no position: nothing left to trade with.
    pub fn is_exhausted(&self) -> bool {
        self.available_cash <= 0.0 && self.current_position <= 0.0
    }

    /// `(forecast - price) / price`.
    pub fn expected_return(&self) -> f64 {
        (self.forecast_price - self.current_price) / self.current_price
    }

    /// Units of the asset the available cash can buy at the current price.
    pub fn max_affordable(&self) -> f64 {
        self.available_cash / self.current_price
    }

    /// State for the next call: cash and position come from `result`,
    /// prices are the next observation.
    pub fn carry_forward(
        &self,
        result: &ExecutionResult,
        forecast_price: f64,
        current_price: f64,
    ) -> Self {
        Self {
            forecast_price,
            current_price,
            current_position: result.position_after,
            available_cash: result.available_cash,
            initial_capital: self.initial_capital,
        }
    }
}
