//! Numeric helpers over price windows.
//!
//! Everything here is a pure function of its slice arguments, in IEEE-754
//! double precision. Callers pass already-trimmed trailing windows.

pub mod atr;
pub mod stats;

pub use atr::{average_true_range, true_range, Atr};
pub use stats::{mean, percentile_rank, simple_returns, std_dev};

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
