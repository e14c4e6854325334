//! Quote fetching and validation

pub mod download;
pub mod provider;
pub mod synthetic;
pub mod validate;
pub mod yahoo;

pub use download::{build_provider, fetch_pair, fetch_series, PairRequest};
pub use provider::{
    DataError, DataProvider, DownloadProgress, FetchResult, LogProgress,
    StdoutProgress,
};
pub use synthetic::SyntheticProvider;
pub use validate::to_series;
pub use yahoo::YahooProvider;
