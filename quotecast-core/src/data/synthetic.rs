//! Synthetic quote provider: seeded geometric random walk on weekdays.
//!
//! Used for `--synthetic` offline runs and as a stand-in provider in tests.
//! The same `(seed, symbol)` always produces the same series.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataProvider, FetchResult};
use crate::domain::DailyBar;
use crate::rng::SeedDeriver;

pub struct SyntheticProvider {
    seeds: SeedDeriver,
    /// Mean daily log return.
    drift: f64,
    /// Daily return scale.
    volatility: f64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seeds: SeedDeriver::new(seed),
            drift: 0.0003,
            volatility: 0.015,
        }
    }

    fn start_price(&self, symbol: &str) -> f64 {
        // Spread symbols across a plausible price range
        let s = self.seeds.sub_seed(symbol, u64::MAX);
        20.0 + (s % 48_000) as f64 / 100.0
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        if end < start {
            return Err(DataError::Other(format!("empty range {start}..{end}")));
        }

        let mut rng = StdRng::seed_from_u64(self.seeds.sub_seed(symbol, 0));
        let mut close = self.start_price(symbol);
        let mut bars = Vec::new();
        let mut day = start;

        while day <= end {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                let shock: f64 = rng.gen_range(-1.0..1.0);
                let open = close;
                close = (close * (self.drift + self.volatility * shock).exp()).max(0.01);
                let spread = close * self.volatility * 0.5;
                bars.push(DailyBar {
                    date: day,
                    open,
                    high: open.max(close) + spread,
                    low: (open.min(close) - spread).max(0.01),
                    close,
                    volume: rng.gen_range(100_000..5_000_000),
                });
            }
            day += Duration::days(1);
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
        })
    }
}
