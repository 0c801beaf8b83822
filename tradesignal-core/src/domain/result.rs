//! ExecutionResult: the realized trade and the updated cash/position pair.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::market::MarketState;

pub const STOPPED_REASON: &str = "Strategy stopped: no capital remaining";
pub const CAPITAL_EXHAUSTED_SUFFIX: &str = " | Strategy stopped: capital exhausted";

/// Outcome of one engine call. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub action: Action,
    pub size: f64,
    pub value: f64,
    pub reason: String,
    pub available_cash: f64,
    pub position_after: f64,
    pub stopped: bool,
}

impl ExecutionResult {
    /// Terminal result for a state with neither cash nor position.
    pub fn stopped() -> Self {
        Self {
            action: Action::Hold,
            size: 0.0,
            value: 0.0,
            reason: STOPPED_REASON.into(),
            available_cash: 0.0,
            position_after: 0.0,
            stopped: true,
        }
    }

    /// No trade: cash and position pass through unchanged.
    pub fn hold(market: &MarketState, reason: impl Into<String>) -> Self {
        Self {
            action: Action::Hold,
            size: 0.0,
            value: 0.0,
            reason: reason.into(),
            available_cash: market.available_cash,
            position_after: market.current_position,
            stopped: false,
        }
    }

    /// True when the post-trade state has neither cash nor position.
    pub fn is_exhausted(&self) -> bool {
        self.available_cash <= 0.0 && self.position_after <= 0.0
    }
}
