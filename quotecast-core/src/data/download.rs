//! Fetch orchestrator: target first, fixed pause, then the reference.
//!
//! The pause is the only rate-limit courtesy: there is no retry, and a
//! failed target fetch skips the reference call entirely.

use std::time::Duration;

use chrono::NaiveDate;

use super::provider::{DataError, DataProvider, DownloadProgress};
use super::synthetic::SyntheticProvider;
use super::validate::to_series;
use super::yahoo::YahooProvider;
use crate::config::ProviderConfig;
use crate::domain::{MarketPair, PriceSeries};

/// What to fetch and over which range.
#[derive(Debug, Clone)]
pub struct PairRequest {
    pub target: String,
    pub reference: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sleep between the target and reference calls.
    pub delay: Duration,
}

impl PairRequest {
    /// Request `target` against the configured reference, covering
    /// `history_days` calendar days up to `end`.
    pub fn from_config(target: &str, config: &ProviderConfig, end: NaiveDate) -> Self {
        Self {
            target: target.to_string(),
            reference: config.reference_symbol.clone(),
            start: end - chrono::Duration::days(config.history_days),
            end,
            delay: config.fetch_delay(),
        }
    }
}

/// Yahoo provider from config, or a seeded synthetic walk when
/// `synthetic_seed` is set.
pub fn build_provider(
    config: &ProviderConfig,
    synthetic_seed: Option<u64>,
) -> Result<Box<dyn DataProvider>, DataError> {
    if let Some(seed) = synthetic_seed {
        return Ok(Box::new(SyntheticProvider::new(seed)));
    }
    let provider = match &config.base_url {
        Some(url) => YahooProvider::with_base_url(url, config.timeout())?,
        None => YahooProvider::new(config.timeout())?,
    };
    Ok(Box::new(provider))
}

/// Fetch and validate a single symbol.
pub fn fetch_series(
    provider: &dyn DataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, DataError> {
    let fetched = provider.fetch(symbol, start, end)?;
    log::debug!(
        "{}: {} raw bars from {}",
        fetched.symbol,
        fetched.bars.len(),
        provider.name()
    );
    to_series(symbol, fetched.bars)
}

/// Fetch target then reference with a fixed delay in between.
pub fn fetch_pair(
    provider: &dyn DataProvider,
    request: &PairRequest,
    progress: &dyn DownloadProgress,
) -> Result<MarketPair, DataError> {
    let target = fetch_step(provider, &request.target, 0, request, progress)?;

    if !request.delay.is_zero() {
        std::thread::sleep(request.delay);
    }

    let reference = fetch_step(provider, &request.reference, 1, request, progress)?;
    Ok(MarketPair { target, reference })
}

fn fetch_step(
    provider: &dyn DataProvider,
    symbol: &str,
    index: usize,
    request: &PairRequest,
    progress: &dyn DownloadProgress,
) -> Result<PriceSeries, DataError> {
    progress.on_start(symbol, index, 2);
    let result = fetch_series(provider, symbol, request.start, request.end);
    let status = match &result {
        Ok(_) => Ok(()),
        Err(e) => Err(DataError::Other(e.to_string())),
    };
    progress.on_complete(symbol, index, 2, &status);
    result
}
