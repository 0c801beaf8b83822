//! Position Sizers: turn a directional signal into a trade size
//!
//! Sizers scale a base size (the request's `execution_size`, or the
//! cash-derived size of a quantile band) by signal strength. They never see
//! cash or position limits: the execution step clamps to what is affordable.

pub mod fixed;
pub mod normalized;
pub mod proportional;

pub use fixed::FixedSizer;
pub use normalized::NormalizedSizer;
pub use proportional::ProportionalSizer;

use serde::{Deserialize, Serialize};

/// Position sizing logic
///
/// # Responsibilities
/// - Convert base size + expected return → desired quantity
///
/// # Non-Responsibilities
/// - Sizers do NOT decide direction (that's the signal generator's job)
/// - Sizers do NOT check affordability (that's the execution engine's job)
pub trait Sizer: Send + Sync {
    /// Desired quantity for a signal with the given expected return.
    fn size(&self, base_size: f64, expected_return: f64) -> f64;

    /// Sizer name for reasons/logging
    fn name(&self) -> &str;
}

/// Optional `[min_position_size, max_position_size]` clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_position_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_position_size: Option<f64>,
}

impl SizeBounds {
    pub fn new(min_position_size: Option<f64>, max_position_size: Option<f64>) -> Self {
        Self {
            max_position_size,
            min_position_size,
        }
    }

    /// Cap at the maximum first, then raise to the minimum.
    pub fn clamp(&self, size: f64) -> f64 {
        let mut size = size;
        if let Some(max) = self.max_position_size {
            size = size.min(max);
        }
        if let Some(min) = self.min_position_size {
            size = size.max(min);
        }
        size
    }

    /// False only when both bounds are set and `max < min`.
    pub fn is_consistent(&self) -> bool {
        match (self.min_position_size, self.max_position_size) {
            (Some(min), Some(max)) => max >= min,
            _ => true,
        }
    }
}
