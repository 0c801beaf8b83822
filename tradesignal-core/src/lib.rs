//! TradeSignal Core: long-only signal generation and capital-aware execution.
//!
//! One request in, one decision out:
//! - Request model and decoding (threshold, return, quantile strategies)
//! - Validation of market state and strategy parameters
//! - Indicators (population stddev, simple returns, True Range / ATR)
//! - Threshold calculation and the three signal generators
//! - Position sizers (fixed, proportional, volatility-normalized)
//! - Execution engine with the Active/Stopped lifecycle
//! - Portfolio utilities and the strategy catalog
//!
//! Every entry point is a pure function of its arguments. Cash and position
//! live with the caller and are threaded from one result into the next call.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod request;
pub mod signals;
pub mod sizers;
pub mod threshold;
pub mod validate;

pub use catalog::{service_status, strategy_catalog, ServiceStatus, StrategyInfo};
pub use config::{ConfigError, EngineConfig};
pub use domain::{
    portfolio_return, portfolio_value, Action, ExecutionResult, MarketState, PortfolioSnapshot,
    Signal,
};
pub use engine::{apply_signal, execute, StrategyState};
pub use error::EngineError;
pub use request::{StrategyRequest, StrategyType};
pub use signals::generate_signal;
