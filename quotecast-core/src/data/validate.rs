//! Turn provider bars into a validated `PriceSeries`.
//!
//! Rules: bars without a finite close are dropped, the rest are sorted by
//! date, duplicate dates keep the later row, and any non-positive close
//! rejects the whole response.

use super::provider::DataError;
use crate::domain::{DailyBar, PriceSeries};

pub fn to_series(symbol: &str, mut bars: Vec<DailyBar>) -> Result<PriceSeries, DataError> {
    let before = bars.len();
    bars.retain(|b| b.close.is_finite());
    if bars.len() < before {
        log::debug!("{symbol}: dropped {} bars without a close", before - bars.len());
    }

    if let Some(bad) = bars.iter().find(|b| !b.has_usable_close()) {
        return Err(DataError::Validation {
            symbol: symbol.to_string(),
            reason: format!("non-positive close {} on {}", bad.close, bad.date),
        });
    }

    // Stable sort keeps provider order within a date, so `last` wins on dedupe
    bars.sort_by_key(|b| b.date);
    let mut dates = Vec::with_capacity(bars.len());
    let mut closes = Vec::with_capacity(bars.len());
    for bar in bars {
        if dates.last() == Some(&bar.date) {
            if let Some(c) = closes.last_mut() {
                *c = bar.close;
            }
            continue;
        }
        dates.push(bar.date);
        closes.push(bar.close);
    }

    if closes.is_empty() {
        return Err(DataError::Validation {
            symbol: symbol.to_string(),
            reason: "no usable closes".into(),
        });
    }

    Ok(PriceSeries::new(symbol, dates, closes))
}
