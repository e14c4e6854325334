//! Forecast projector.
//!
//! One pass over `horizon` steps. The indicator snapshot is taken once from
//! the working window and stays frozen: only the running price moves, so the
//! mean-reversion term is re-evaluated per step against fixed MA anchors.

use serde::{Deserialize, Serialize};

use super::config::ForecastConfig;
use super::noise::NoiseSource;
use crate::indicators::{mean_reversion_signal, IndicatorSnapshot};

/// One projected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 1-based offset from the last known close.
    pub day: usize,
    /// Projected close, rounded to cents.
    pub price: f64,
    /// Bounded fractional change applied to reach `price`.
    pub change: f64,
}

/// Projector bound to a parameter set.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ForecastConfig,
}

impl Projector {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Snapshot of the anchors used for a projection, or `None` when the
    /// target has fewer than `min_history` closes.
    pub fn snapshot(&self, target: &[f64], reference: &[f64]) -> Option<IndicatorSnapshot> {
        let window = self.working_window(target)?;
        Some(IndicatorSnapshot::compute(window, reference, &self.config))
    }

    /// Project `horizon` closes past the end of `target`.
    ///
    /// Returns an empty vector when `target` is shorter than `min_history`.
    pub fn project<N: NoiseSource + ?Sized>(
        &self,
        target: &[f64],
        reference: &[f64],
        horizon: usize,
        noise: &mut N,
    ) -> Vec<ForecastPoint> {
        let Some(window) = self.working_window(target) else {
            return Vec::new();
        };
        let snapshot = IndicatorSnapshot::compute(window, reference, &self.config);
        let start = window[window.len() - 1];
        self.project_from(&snapshot, start, horizon, noise)
    }

    /// Run the step loop from a precomputed snapshot and starting price.
    pub fn project_from<N: NoiseSource + ?Sized>(
        &self,
        snapshot: &IndicatorSnapshot,
        start_price: f64,
        horizon: usize,
        noise: &mut N,
    ) -> Vec<ForecastPoint> {
        let cfg = &self.config;
        let w = &cfg.weights;
        let bound = snapshot.daily_bound(cfg);

        let rsi_signal = (50.0 - snapshot.rsi) / 50.0;
        let market_influence = snapshot.reference_return * snapshot.correlation;

        let mut price = start_price;
        let mut points = Vec::with_capacity(horizon);

        for day in 1..=horizon {
            let step = day as f64;

            let mean_reversion = mean_reversion_signal(price, snapshot.ma_short, snapshot.ma_long);
            let momentum_effect = snapshot.momentum * (-cfg.momentum_decay * step).exp();

            let blend = w.mean_reversion * mean_reversion
                + w.rsi * rsi_signal
                + w.market * market_influence
                + w.momentum * momentum_effect;

            let stochastic = snapshot.volatility * (noise.next_unit() - 0.5) * step.sqrt();

            let raw = (blend + stochastic) * (-cfg.dampening * step).exp();
            let change = clamp_change(raw, bound);

            price = round_cents(price * (1.0 + change));
            points.push(ForecastPoint { day, price, change });
        }

        log::debug!(
            "projected {horizon} steps from {start_price:.2}, bound ±{:.4}",
            bound
        );
        points
    }

    fn working_window<'a>(&self, target: &'a [f64]) -> Option<&'a [f64]> {
        let n = self.config.min_history.max(1);
        if target.len() < n {
            return None;
        }
        Some(&target[target.len() - n..])
    }
}

/// Project with default parameters.
pub fn project<N: NoiseSource + ?Sized>(
    target: &[f64],
    reference: &[f64],
    horizon: usize,
    noise: &mut N,
) -> Vec<ForecastPoint> {
    Projector::default().project(target, reference, horizon, noise)
}

/// NaN change or a NaN/negative bound (unvalidated config) means no movement.
fn clamp_change(raw: f64, bound: f64) -> f64 {
    if raw.is_nan() || bound.is_nan() || bound <= 0.0 {
        return 0.0;
    }
    raw.clamp(-bound, bound)
}

/// Round to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::noise::{ConstantNoise, SeededNoise};

    fn wavy(n: usize, base: f64) -> Vec<f64> {
        (0..n)
            .map(|i| base + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn short_history_yields_nothing() {
        let target = wavy(49, 100.0);
        let reference = wavy(60, 400.0);
        let points = project(&target, &reference, 5, &mut ConstantNoise(0.5));
        assert!(points.is_empty());
    }

    #[test]
    fn exactly_min_history_yields_horizon_points() {
        let target = wavy(50, 100.0);
        let reference = wavy(50, 400.0);
        let points = project(&target, &reference, 7, &mut ConstantNoise(0.5));
        assert_eq!(points.len(), 7);
        let days: Vec<usize> = points.iter().map(|p| p.day).collect();
        assert_eq!(days, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn zero_horizon_is_empty() {
        let target = wavy(80, 100.0);
        assert!(project(&target, &target, 0, &mut ConstantNoise(0.5)).is_empty());
    }

    #[test]
    fn prices_are_rounded_to_cents() {
        let target = wavy(80, 100.0);
        let reference = wavy(80, 300.0);
        for p in project(&target, &reference, 10, &mut SeededNoise::new(3)) {
            assert!((p.price * 100.0 - (p.price * 100.0).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn constant_noise_is_deterministic() {
        let target = wavy(70, 100.0);
        let reference = wavy(70, 250.0);
        let a = project(&target, &reference, 10, &mut ConstantNoise(0.3));
        let b = project(&target, &reference, 10, &mut ConstantNoise(0.3));
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_noise_is_deterministic() {
        let target = wavy(70, 100.0);
        let reference = wavy(70, 250.0);
        let a = project(&target, &reference, 10, &mut SeededNoise::new(11));
        let b = project(&target, &reference, 10, &mut SeededNoise::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn only_trailing_window_matters() {
        let mut long = vec![1.0, 5000.0, 3.0];
        let tail = wavy(50, 100.0);
        long.extend_from_slice(&tail);
        let reference = wavy(50, 250.0);
        let a = project(&long, &reference, 5, &mut ConstantNoise(0.5));
        let b = project(&tail, &reference, 5, &mut ConstantNoise(0.5));
        assert_eq!(a, b);
    }

    #[test]
    fn flat_history_stays_flat() {
        // Zero volatility → zero bound → no movement regardless of signals
        let target = vec![42.0; 60];
        let reference = wavy(60, 300.0);
        let points = project(&target, &reference, 5, &mut SeededNoise::new(9));
        assert!(points.iter().all(|p| p.price == 42.0 && p.change == 0.0));
    }

    #[test]
    fn first_step_matches_hand_computation() {
        let target = wavy(60, 100.0);
        let reference = wavy(60, 250.0);
        let projector = Projector::default();
        let snap = projector.snapshot(&target, &reference).unwrap();
        let start = *target.last().unwrap();

        let mr = mean_reversion_signal(start, snap.ma_short, snap.ma_long);
        let blend = 0.3 * mr
            + 0.2 * ((50.0 - snap.rsi) / 50.0)
            + 0.3 * (snap.reference_return * snap.correlation)
            + 0.2 * (snap.momentum * (-0.5f64).exp());
        // noise 0.5 cancels the stochastic term
        let bound = 0.1f64.min(snap.volatility * 2.0);
        let change = (blend * (-0.1f64).exp()).clamp(-bound, bound);
        let expected = round_cents(start * (1.0 + change));

        let points = projector.project(&target, &reference, 1, &mut ConstantNoise(0.5));
        assert_eq!(points[0].price, expected);
        assert!((points[0].change - change).abs() < 1e-15);
    }

    #[test]
    fn later_steps_use_frozen_anchors() {
        let target = wavy(60, 100.0);
        let reference = wavy(60, 250.0);
        let projector = Projector::default();
        let snap = projector.snapshot(&target, &reference).unwrap();
        let bound = 0.1f64.min(snap.volatility * 2.0);
        let u = 0.8;

        let mut price = *target.last().unwrap();
        let mut expected = Vec::new();
        for day in 1..=5 {
            let i = day as f64;
            let mr = mean_reversion_signal(price, snap.ma_short, snap.ma_long);
            let blend = 0.3 * mr
                + 0.2 * ((50.0 - snap.rsi) / 50.0)
                + 0.3 * (snap.reference_return * snap.correlation)
                + 0.2 * (snap.momentum * (-0.5 * i).exp());
            let stochastic = snap.volatility * (u - 0.5) * i.sqrt();
            let change = ((blend + stochastic) * (-0.1 * i).exp()).clamp(-bound, bound);
            price = round_cents(price * (1.0 + change));
            expected.push((price, change));
        }

        let points = projector.project(&target, &reference, 5, &mut ConstantNoise(u));
        assert_eq!(points.len(), 5);
        for (point, (price, change)) in points.iter().zip(&expected) {
            assert_eq!(point.price, *price, "day {}", point.day);
            assert!((point.change - change).abs() < 1e-15, "day {}", point.day);
        }
    }

    #[test]
    fn negative_bound_multiplier_does_not_panic() {
        let config = ForecastConfig {
            volatility_bound_multiplier: -1.0,
            ..ForecastConfig::default()
        };
        assert!(config.validate().is_err());

        let target = wavy(60, 100.0);
        let points = Projector::new(config).project(&target, &target, 3, &mut ConstantNoise(0.5));
        assert_eq!(points.len(), 3);
        let start = *target.last().unwrap();
        assert!(points.iter().all(|p| p.change == 0.0 && p.price == round_cents(start)));
    }

    #[test]
    fn nan_bound_means_no_movement() {
        assert_eq!(clamp_change(0.05, f64::NAN), 0.0);
        assert_eq!(clamp_change(0.05, -0.01), 0.0);
        assert_eq!(clamp_change(f64::NAN, 0.1), 0.0);
        assert_eq!(clamp_change(0.5, 0.1), 0.1);
    }

    #[test]
    fn changes_respect_bound() {
        let target = wavy(90, 100.0);
        let reference = wavy(90, 250.0);
        let projector = Projector::default();
        let bound = projector
            .snapshot(&target, &reference)
            .unwrap()
            .daily_bound(projector.config());
        for extreme in [0.0, 0.999_999] {
            for p in projector.project(&target, &reference, 30, &mut ConstantNoise(extreme)) {
                assert!(p.change.abs() <= bound + 1e-15);
            }
        }
    }

    #[test]
    fn round_cents_cases() {
        assert_eq!(round_cents(100.004), 100.0);
        assert_eq!(round_cents(100.006), 100.01);
        assert_eq!(round_cents(-1.234), -1.23);
    }
}
