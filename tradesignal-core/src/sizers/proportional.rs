//! Proportional Position Sizer
//!
//! Scales the base size by the expected return in percentage points:
//! a 10% expected return trades 10x the base size, 1% trades 1x.

use crate::sizers::Sizer;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalSizer;

impl Sizer for ProportionalSizer {
    fn size(&self, base_size: f64, expected_return: f64) -> f64 {
        base_size * expected_return.abs() * 100.0
    }

    fn name(&self) -> &str {
        "proportional"
    }
}
