//! Application configuration loaded from TOML.
//!
//! ```toml
//! horizon_days = 5
//!
//! [provider]
//! reference_symbol = "SPY"
//! history_days = 365
//! fetch_delay_ms = 1000
//!
//! [forecast]
//! dampening = 0.1
//! ```
//!
//! Every key is optional; a missing file means defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forecast::{ForecastConfig, ForecastConfigError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid config: forecast: {0}")]
    Forecast(#[from] ForecastConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Market index proxy the target is correlated against.
    pub reference_symbol: String,
    /// Calendar days of history requested per symbol.
    pub history_days: i64,
    /// Pause between the target and the reference request.
    pub fetch_delay_ms: u64,
    pub timeout_secs: u64,
    /// Override for the quote API host.
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            reference_symbol: "SPY".into(),
            history_days: 365,
            fetch_delay_ms: 1000,
            timeout_secs: 30,
            base_url: None,
        }
    }
}

impl ProviderConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotecastConfig {
    /// Trading days to project.
    pub horizon_days: usize,
    /// Master seed for reproducible forecasts; `None` draws from entropy.
    pub seed: Option<u64>,
    pub provider: ProviderConfig,
    pub forecast: ForecastConfig,
}

impl Default for QuotecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 5,
            seed: None,
            provider: ProviderConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl QuotecastConfig {
    /// Load from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days == 0 {
            return Err(ConfigError::Invalid("horizon_days must be >= 1".into()));
        }
        if self.provider.history_days <= 0 {
            return Err(ConfigError::Invalid("provider.history_days must be > 0".into()));
        }
        crate::domain::normalize_symbol(&self.provider.reference_symbol)
            .map_err(|e| ConfigError::Invalid(format!("provider.reference_symbol: {e}")))?;
        self.forecast.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(QuotecastConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let config = QuotecastConfig::from_toml(
            r#"
            horizon_days = 10
            seed = 7

            [provider]
            reference_symbol = "QQQ"

            [forecast.weights]
            market = 0.4
            "#,
        )
        .unwrap();
        assert_eq!(config.horizon_days, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.provider.reference_symbol, "QQQ");
        assert_eq!(config.provider.fetch_delay_ms, 1000);
        assert_eq!(config.forecast.weights.market, 0.4);
        assert_eq!(config.forecast.weights.rsi, 0.2);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = QuotecastConfig::from_toml("horizon_days = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_horizon_is_invalid() {
        let err = QuotecastConfig::from_toml("horizon_days = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_reference_symbol_is_invalid() {
        let err = QuotecastConfig::from_toml("[provider]\nreference_symbol = \"S P Y\"").unwrap_err();
        assert!(err.to_string().contains("reference_symbol"));
    }

    #[test]
    fn bad_forecast_table_is_typed_error() {
        let err = QuotecastConfig::from_toml("[forecast]\nmax_daily_change = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Forecast(ForecastConfigError::MaxDailyChange)
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let config = QuotecastConfig::load(Path::new("/nonexistent/quotecast.toml")).unwrap();
        assert_eq!(config, QuotecastConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join("quotecast_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quotecast.toml");
        std::fs::write(&path, "horizon_days = 3\n").unwrap();

        let config = QuotecastConfig::load(&path).unwrap();
        assert_eq!(config.horizon_days, 3);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
