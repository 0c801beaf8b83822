//! Trade action: the directional outcome of a signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Long-only trade direction. `Sell` only ever reduces an existing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
        }
    }

    /// True for actions that move cash or position.
    pub fn is_trade(&self) -> bool {
        !matches!(self, Self::Hold)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
