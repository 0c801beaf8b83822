//! Signal: the intermediate decision a generator hands to the execution step.

use super::action::Action;

/// Desired action and size, before capital constraints are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub action: Action,
    /// Desired size in units; always 0 for `Hold`.
    pub size: f64,
    pub reason: String,
}

impl Signal {
    pub fn buy(size: f64, reason: impl Into<String>) -> Self {
        Self {
            action: Action::Buy,
            size,
            reason: reason.into(),
        }
    }

    pub fn sell(size: f64, reason: impl Into<String>) -> Self {
        Self {
            action: Action::Sell,
            size,
            reason: reason.into(),
        }
    }

    pub fn hold(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Hold,
            size: 0.0,
            reason: reason.into(),
        }
    }
}
