//! Execution engine: applies a signal to the caller's cash and position.
//!
//! One call, one decision:
//!
//! 1. Validate the request (all-or-nothing, no state touched on error)
//! 2. Entry guard: a stopped strategy holds without generating a signal
//! 3. Generate the strategy's signal
//! 4. Clamp to what is affordable (buy) or held (sell) and settle cash/position
//!
//! Invariants on every result: `available_cash >= 0`, `position_after >= 0`,
//! `value == size * current_price` for trades, `stopped` iff both are exhausted.

pub mod state;

pub use state::StrategyState;

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::domain::result::CAPITAL_EXHAUSTED_SUFFIX;
use crate::domain::{Action, ExecutionResult, MarketState, Signal};
use crate::error::EngineError;
use crate::request::StrategyRequest;
use crate::signals::dispatch;
use crate::validate::validate_request;

pub const INSUFFICIENT_CASH_REASON: &str = "Insufficient cash to buy";
pub const NO_POSITION_REASON: &str = "No position to sell";

/// Validate, generate and execute one strategy request.
pub fn execute(
    request: &StrategyRequest,
    config: &EngineConfig,
) -> Result<ExecutionResult, EngineError> {
    validate_request(request, config)?;

    let market = request.market();
    if StrategyState::of(market).is_stopped() {
        warn!(strategy = %request.strategy_type(), "strategy stopped: no capital remaining");
        return Ok(ExecutionResult::stopped());
    }

    let signal = dispatch(request, config);
    Ok(apply_signal(market, signal))
}

/// Settle a signal against the current cash and position.
///
/// - Hold: state passes through unchanged
/// - Buy: size capped at `cash / price`; nothing affordable degrades to hold
/// - Sell: size capped at the position; nothing held degrades to hold
pub fn apply_signal(market: &MarketState, signal: Signal) -> ExecutionResult {
    let price = market.current_price;
    let cash = market.available_cash;
    let position = market.current_position;

    let actual_size = match signal.action {
        Action::Hold => {
            info!(reason = %signal.reason, "hold signal");
            return ExecutionResult::hold(market, signal.reason);
        }
        Action::Buy => {
            let actual = signal.size.min(market.max_affordable());
            if actual <= 0.0 {
                warn!(
                    available_cash = cash,
                    required = signal.size * price,
                    "insufficient cash to buy"
                );
                return ExecutionResult::hold(market, INSUFFICIENT_CASH_REASON);
            }
            actual
        }
        Action::Sell => {
            let actual = signal.size.min(position);
            if actual <= 0.0 {
                warn!(current_position = position, "no position to sell");
                return ExecutionResult::hold(market, NO_POSITION_REASON);
            }
            actual
        }
    };

    let value = actual_size * price;
    let (available_cash, position_after) = match signal.action {
        Action::Buy => ((cash - value).max(0.0), position + actual_size),
        _ => (cash + value, (position - actual_size).max(0.0)),
    };

    info!(
        action = %signal.action,
        size = actual_size,
        price,
        value,
        "trade executed"
    );

    let mut result = ExecutionResult {
        action: signal.action,
        size: actual_size,
        value,
        reason: signal.reason,
        available_cash,
        position_after,
        stopped: false,
    };

    if StrategyState::after(&result).is_stopped() {
        warn!("strategy stopped: capital exhausted after trade");
        result.stopped = true;
        result.reason.push_str(CAPITAL_EXHAUSTED_SUFFIX);
    }

    result
}
