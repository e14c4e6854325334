//! Domain types for Quotecast

pub mod bar;
pub mod series;
pub mod symbol;

pub use bar::DailyBar;
pub use series::{MarketPair, PriceSeries};
pub use symbol::{normalize_symbol, SymbolError};
