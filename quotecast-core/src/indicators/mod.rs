//! Indicator calculator.
//!
//! Pure functions over closing-price slices. Every function is total: each
//! zero-denominator or short-history case has a documented fallback, so no
//! NaN reaches the forecast blend.

pub mod mean_reversion;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod stats;

pub use mean_reversion::mean_reversion_signal;
pub use momentum::momentum;
pub use rsi::rsi;
pub use sma::{last_moving_average, moving_average};
pub use snapshot::IndicatorSnapshot;
pub use stats::{correlation, returns, volatility};

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
