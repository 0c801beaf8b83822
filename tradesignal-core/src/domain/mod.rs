//! Domain types for the signal and execution engine.

pub mod action;
pub mod history;
pub mod market;
pub mod portfolio;
pub mod result;
pub mod signal;

pub use action::Action;
pub use history::{HistorySeries, Ohlc, WhichHistory};
pub use market::MarketState;
pub use portfolio::{portfolio_return, portfolio_value, PortfolioSnapshot};
pub use result::ExecutionResult;
pub use signal::Signal;
