//! Short-horizon price forecasting.
//!
//! - `config`: weights, windows and decay constants
//! - `noise`: injected randomness for the stochastic term
//! - `projector`: the step loop over a frozen indicator snapshot
//! - `calendar` / `report`: attach trading dates for display

pub mod calendar;
pub mod config;
pub mod noise;
pub mod projector;
pub mod report;

pub use calendar::next_trading_days;
pub use config::{ForecastConfig, ForecastConfigError, SignalWeights, MIN_HISTORY};
pub use noise::{ConstantNoise, EntropyNoise, NoiseSource, SeededNoise};
pub use projector::{project, round_cents, ForecastPoint, Projector};
pub use report::{build_report, DatedPoint, ForecastReport};
