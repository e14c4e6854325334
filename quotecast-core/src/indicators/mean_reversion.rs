//! Mean-reversion pull toward the short and long moving averages.

/// Negative of the average fractional deviation of `price` from both averages.
///
/// A price above both averages gives a negative (pull-down) signal. An
/// average of exactly zero contributes nothing to the mean.
pub fn mean_reversion_signal(price: f64, ma_short: f64, ma_long: f64) -> f64 {
    let deviation = |ma: f64| if ma == 0.0 { 0.0 } else { (price - ma) / ma };
    -(deviation(ma_short) + deviation(ma_long)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn above_both_pulls_down() {
        // (110-100)/100 = 0.1, (110-110)/110 = 0 → -(0.1)/2
        assert_approx(mean_reversion_signal(110.0, 100.0, 110.0), -0.05, DEFAULT_EPSILON);
    }

    #[test]
    fn below_both_pushes_up() {
        assert!(mean_reversion_signal(90.0, 100.0, 95.0) > 0.0);
    }

    #[test]
    fn at_averages_is_zero() {
        assert_approx(mean_reversion_signal(100.0, 100.0, 100.0), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_average_contributes_nothing() {
        assert_approx(mean_reversion_signal(110.0, 0.0, 100.0), -0.05, DEFAULT_EPSILON);
        assert_eq!(mean_reversion_signal(110.0, 0.0, 0.0), 0.0);
    }
}
