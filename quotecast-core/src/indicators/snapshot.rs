//! Indicator snapshot: the scalar inputs of one forecast run.
//!
//! Computed once from the target working window and the reference tail,
//! then held fixed for every projection step.

use serde::{Deserialize, Serialize};

use super::{correlation, last_moving_average, momentum, returns, rsi, volatility};
use crate::forecast::ForecastConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Std-dev of daily returns over the volatility window.
    pub volatility: f64,
    /// RSI over the configured period.
    pub rsi: f64,
    /// Mean daily return over the momentum window.
    pub momentum: f64,
    /// Short moving average at the last close (MA20 by default).
    pub ma_short: f64,
    /// Long moving average at the last close (MA50 by default).
    pub ma_long: f64,
    /// Correlation of target and reference returns over the correlation window.
    pub correlation: f64,
    /// Last daily return of the reference series.
    pub reference_return: f64,
}

impl IndicatorSnapshot {
    /// Build the snapshot from a working window of target closes and the
    /// full reference series.
    ///
    /// Moving averages that cannot be formed (window shorter than the period)
    /// fall back to the last close, which zeroes their mean-reversion term.
    pub fn compute(window: &[f64], reference: &[f64], config: &ForecastConfig) -> Self {
        let last = window.last().copied().unwrap_or(0.0);
        let corr_n = config.correlation_window;

        let target_returns = returns(tail(window, corr_n));
        let reference_returns = returns(tail(reference, corr_n));

        Self {
            volatility: volatility(window, config.volatility_window),
            rsi: rsi(window, config.rsi_period),
            momentum: momentum(window, config.momentum_period),
            ma_short: last_moving_average(window, config.ma_short_period).unwrap_or(last),
            ma_long: last_moving_average(window, config.ma_long_period).unwrap_or(last),
            correlation: correlation(&target_returns, &reference_returns),
            reference_return: last_return(reference),
        }
    }

    /// Largest absolute fractional change allowed for a single step.
    pub fn daily_bound(&self, config: &ForecastConfig) -> f64 {
        config
            .max_daily_change
            .min(self.volatility * config.volatility_bound_multiplier)
    }
}

fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// Return between the last two values; 0 when fewer than two exist.
fn last_return(values: &[f64]) -> f64 {
    match values {
        [.., prev, last] if *prev != 0.0 => (last - prev) / prev,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    fn ramp(n: usize, start: f64, step: f64) -> Vec<f64> {
        (0..n).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn snapshot_on_ramp() {
        let window = ramp(50, 100.0, 1.0);
        let reference = ramp(50, 400.0, 2.0);
        let config = ForecastConfig::default();
        let snap = IndicatorSnapshot::compute(&window, &reference, &config);

        // Straight uptrend: no losses → capped RSI
        assert_eq!(snap.rsi, 70.0);
        // MA20 of 130..=149 = 139.5, MA50 of 100..=149 = 124.5
        assert_approx(snap.ma_short, 139.5, 1e-9);
        assert_approx(snap.ma_long, 124.5, 1e-9);
        assert!(snap.momentum > 0.0);
        assert!(snap.volatility > 0.0);
        // Both returns series decline monotonically → strongly correlated
        assert!(snap.correlation > 0.99);
        assert_approx(snap.reference_return, 2.0 / 496.0, 1e-12);
    }

    #[test]
    fn short_reference_gives_zero_market_inputs() {
        let window = ramp(50, 100.0, 1.0);
        let snap = IndicatorSnapshot::compute(&window, &[300.0], &ForecastConfig::default());
        assert_eq!(snap.reference_return, 0.0);
        assert_eq!(snap.correlation, 0.0);
    }

    #[test]
    fn daily_bound_caps_at_ten_percent() {
        let config = ForecastConfig::default();
        let mut snap = IndicatorSnapshot::compute(&ramp(50, 100.0, 1.0), &[], &config);
        snap.volatility = 0.2;
        assert_eq!(snap.daily_bound(&config), 0.1);
        snap.volatility = 0.01;
        assert_approx(snap.daily_bound(&config), 0.02, 1e-12);
    }

    #[test]
    fn last_return_cases() {
        assert_eq!(last_return(&[]), 0.0);
        assert_eq!(last_return(&[5.0]), 0.0);
        assert_eq!(last_return(&[0.0, 5.0]), 0.0);
        assert_approx(last_return(&[100.0, 101.0]), 0.01, 1e-12);
    }
}
