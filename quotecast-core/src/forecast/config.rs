//! Forecast parameters.
//!
//! `Default` reproduces the heuristic's fixed constants; a `[forecast]`
//! table in the config file may override any of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of target closes needed to produce a forecast.
pub const MIN_HISTORY: usize = 50;

/// Blend weights for the four deterministic signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub mean_reversion: f64,
    pub rsi: f64,
    pub market: f64,
    pub momentum: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            mean_reversion: 0.3,
            rsi: 0.2,
            market: 0.3,
            momentum: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastConfigError {
    #[error("{0} must be >= 1")]
    ZeroWindow(&'static str),

    #[error("{name} ({value}) exceeds min_history ({min_history})")]
    WindowTooLong {
        name: &'static str,
        value: usize,
        min_history: usize,
    },

    #[error("max_daily_change must be > 0")]
    MaxDailyChange,

    #[error("volatility_bound_multiplier must be >= 0")]
    BoundMultiplier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Target closes required; also the size of the working window.
    pub min_history: usize,
    pub rsi_period: usize,
    pub momentum_period: usize,
    pub volatility_window: usize,
    pub correlation_window: usize,
    pub ma_short_period: usize,
    pub ma_long_period: usize,
    pub weights: SignalWeights,
    /// Momentum term decays as `exp(-momentum_decay * step)`.
    pub momentum_decay: f64,
    /// Combined return is dampened by `exp(-dampening * step)`.
    pub dampening: f64,
    /// Hard cap on the per-step fractional change.
    pub max_daily_change: f64,
    /// Per-step cap is also limited to `volatility * volatility_bound_multiplier`.
    pub volatility_bound_multiplier: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_history: MIN_HISTORY,
            rsi_period: 14,
            momentum_period: 10,
            volatility_window: 20,
            correlation_window: 20,
            ma_short_period: 20,
            ma_long_period: 50,
            weights: SignalWeights::default(),
            momentum_decay: 0.5,
            dampening: 0.1,
            max_daily_change: 0.1,
            volatility_bound_multiplier: 2.0,
        }
    }
}

impl ForecastConfig {
    /// Check that windows are usable and the working window can hold them.
    pub fn validate(&self) -> Result<(), ForecastConfigError> {
        let windows = [
            ("rsi_period", self.rsi_period),
            ("momentum_period", self.momentum_period),
            ("volatility_window", self.volatility_window),
            ("correlation_window", self.correlation_window),
            ("ma_short_period", self.ma_short_period),
            ("ma_long_period", self.ma_long_period),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(ForecastConfigError::ZeroWindow(name));
            }
            if value > self.min_history {
                return Err(ForecastConfigError::WindowTooLong {
                    name,
                    value,
                    min_history: self.min_history,
                });
            }
        }
        if self.max_daily_change.is_nan() || self.max_daily_change <= 0.0 {
            return Err(ForecastConfigError::MaxDailyChange);
        }
        if self.volatility_bound_multiplier.is_nan() || self.volatility_bound_multiplier < 0.0 {
            return Err(ForecastConfigError::BoundMultiplier);
        }
        Ok(())
    }
}
