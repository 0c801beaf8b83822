//! Portfolio utilities: value and return-on-capital of a cash + position pair.
//!
//! Pure helpers for callers; the engine itself never calls them.

use serde::{Deserialize, Serialize};

use super::result::ExecutionResult;

/// Total value = cash + position marked at `current_price`.
pub fn portfolio_value(current_position: f64, current_price: f64, available_cash: f64) -> f64 {
    available_cash + current_position * current_price
}

/// Return relative to initial capital, as a fraction. 0.0 when no capital was committed.
pub fn portfolio_return(
    current_position: f64,
    current_price: f64,
    available_cash: f64,
    initial_capital: f64,
) -> f64 {
    if initial_capital == 0.0 {
        return 0.0;
    }
    let value = portfolio_value(current_position, current_price, available_cash);
    (value - initial_capital) / initial_capital
}

/// Value and return of the state an `ExecutionResult` leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub value: f64,
    #[serde(rename = "return")]
    pub total_return: f64,
}

impl PortfolioSnapshot {
    pub fn from_result(result: &ExecutionResult, current_price: f64, initial_capital: f64) -> Self {
        Self {
            value: portfolio_value(result.position_after, current_price, result.available_cash),
            total_return: portfolio_return(
                result.position_after,
                current_price,
                result.available_cash,
                initial_capital,
            ),
        }
    }
}
