//! Signal generation: one generator per strategy family.
//!
//! Generators turn a validated request into a desired `{action, size, reason}`.
//! They never clamp to cash or position; the execution engine does that.

pub mod expected_return;
pub mod quantile;
pub mod threshold;

pub use quantile::percentile;

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::Signal;
use crate::error::EngineError;
use crate::request::StrategyRequest;
use crate::validate::validate_request;

/// Strategy-specific signal logic.
///
/// # Invariants
/// - `generate()` is only called on a validated request
/// - `generate()` MUST be deterministic for the same request and config
/// - `Hold` signals always carry size 0
pub trait SignalGenerator: Send + Sync {
    /// Desired action and size, before capital constraints.
    fn generate(&self, config: &EngineConfig) -> Signal;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

impl StrategyRequest {
    /// The generator for this request's strategy family.
    pub fn generator(&self) -> &dyn SignalGenerator {
        match self {
            Self::Threshold(r) => r,
            Self::Return(r) => r,
            Self::Quantile(r) => r,
        }
    }
}

/// Validate `request` and compute its signal without executing it.
pub fn generate_signal(
    request: &StrategyRequest,
    config: &EngineConfig,
) -> Result<Signal, EngineError> {
    validate_request(request, config)?;
    Ok(dispatch(request, config))
}

/// Run the generator for an already-validated request.
pub(crate) fn dispatch(request: &StrategyRequest, config: &EngineConfig) -> Signal {
    let generator = request.generator();
    debug!(strategy = generator.name(), "generating signal");
    let signal = generator.generate(config);
    debug!(
        strategy = generator.name(),
        action = %signal.action,
        size = signal.size,
        reason = %signal.reason,
        "signal generated"
    );
    signal
}

/// `12.34%` style rendering of a fraction.
pub(crate) fn fmt_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
