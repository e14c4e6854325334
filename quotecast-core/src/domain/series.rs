//! PriceSeries: validated, chronologically ascending closing prices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing prices for one symbol, one entry per trading day, oldest first.
///
/// Constructed by `data::validate::to_series`; `dates` and `closes` always
/// have the same length and dates are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, dates: Vec<NaiveDate>, closes: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), closes.len());
        Self {
            symbol: symbol.into(),
            dates,
            closes,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// A target series together with the market reference it is compared against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPair {
    pub target: PriceSeries,
    pub reference: PriceSeries,
}
