//! Strategy lifecycle state.
//!
//! A strategy is `Active` while it holds cash or a position. Once both are
//! exhausted it is `Stopped`, and stays stopped: the engine answers every
//! later call with a terminal hold.

use crate::domain::{ExecutionResult, MarketState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyState {
    Active,
    Stopped,
}

impl StrategyState {
    /// State implied by the caller-supplied cash and position.
    pub fn of(market: &MarketState) -> Self {
        if market.is_exhausted() {
            Self::Stopped
        } else {
            Self::Active
        }
    }

    /// State after a result has been applied.
    pub fn after(result: &ExecutionResult) -> Self {
        if result.stopped || result.is_exhausted() {
            Self::Stopped
        } else {
            Self::Active
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}
