//! Fixed Position Sizer
//!
//! Simplest sizer: trade the base size regardless of signal strength.

use crate::sizers::Sizer;

/// Fixed position sizer
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSizer;

impl Sizer for FixedSizer {
    fn size(&self, base_size: f64, _expected_return: f64) -> f64 {
        base_size
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
