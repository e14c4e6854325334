//! Background worker thread: all fetching and projection runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Commands
//! are handled one at a time, so the fixed delay between the target and
//! reference calls also spaces consecutive symbols.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use quotecast_core::config::QuotecastConfig;
use quotecast_core::data::{fetch_pair, DataError, DataProvider, DownloadProgress, PairRequest};
use quotecast_core::domain::PriceSeries;
use quotecast_core::forecast::{build_report, EntropyNoise, ForecastReport, NoiseSource, Projector};
use quotecast_core::rng::SeedDeriver;

use crate::app::ErrorCategory;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Fetch `symbol` plus the reference and project a forecast.
    Forecast { symbol: String, run: u64 },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Progress {
        symbol: String,
        run: u64,
        step: usize,
        total: usize,
    },
    ForecastReady {
        symbol: String,
        run: u64,
        history: Box<PriceSeries>,
        report: Box<ForecastReport>,
    },
    ForecastFailed {
        symbol: String,
        run: u64,
        category: ErrorCategory,
        message: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Box<dyn DataProvider>,
    config: QuotecastConfig,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("quotecast-worker".into())
        .spawn(move || worker_loop(rx, tx, provider.as_ref(), &config))
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: &dyn DataProvider,
    config: &QuotecastConfig,
) {
    let projector = Projector::new(config.forecast.clone());
    let seeds = config.seed.map(SeedDeriver::new);
    log::info!("worker started with provider {}", provider.name());

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Forecast { symbol, run }) => {
                let resp = handle_forecast(
                    &symbol,
                    run,
                    provider,
                    config,
                    &projector,
                    seeds.as_ref(),
                    &tx,
                );
                if tx.send(resp).is_err() {
                    break;
                }
            }
        }
    }
    log::info!("worker stopped");
}

fn handle_forecast(
    symbol: &str,
    run: u64,
    provider: &dyn DataProvider,
    config: &QuotecastConfig,
    projector: &Projector,
    seeds: Option<&SeedDeriver>,
    tx: &Sender<WorkerResponse>,
) -> WorkerResponse {
    let today = chrono::Local::now().date_naive();
    let request = PairRequest::from_config(symbol, &config.provider, today);
    let progress = ChannelProgress {
        tx: tx.clone(),
        target: symbol.to_string(),
        run,
    };

    let pair = match fetch_pair(provider, &request, &progress) {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("{symbol}: fetch failed: {e}");
            return WorkerResponse::ForecastFailed {
                symbol: symbol.to_string(),
                run,
                category: categorize(&e),
                message: e.to_string(),
            };
        }
    };

    let mut noise: Box<dyn NoiseSource> = match seeds {
        Some(s) => Box::new(s.noise_for(symbol, run)),
        None => Box::new(EntropyNoise::new()),
    };
    let report = build_report(&pair, projector, config.horizon_days, &mut noise);
    log::info!(
        "{symbol}: {} closes, {} forecast points",
        report.history_len,
        report.points.len()
    );

    WorkerResponse::ForecastReady {
        symbol: symbol.to_string(),
        run,
        history: Box::new(pair.target),
        report: Box::new(report),
    }
}

fn categorize(err: &DataError) -> ErrorCategory {
    match err {
        DataError::NetworkUnreachable(_) | DataError::RateLimited { .. } => ErrorCategory::Network,
        DataError::ResponseFormatChanged(_)
        | DataError::SymbolNotFound { .. }
        | DataError::Validation { .. } => ErrorCategory::Data,
        DataError::AuthenticationRequired(_) | DataError::Other(_) => ErrorCategory::Other,
    }
}

/// DownloadProgress implementation that sends messages through a channel.
///
/// Progress is reported against the target symbol even while the reference
/// is being fetched.
struct ChannelProgress {
    tx: Sender<WorkerResponse>,
    target: String,
    run: u64,
}

impl DownloadProgress for ChannelProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        log::debug!("fetching {symbol} ({}/{total})", index + 1);
        let _ = self.tx.send(WorkerResponse::Progress {
            symbol: self.target.clone(),
            run: self.run,
            step: index + 1,
            total,
        });
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        if let Err(e) = result {
            log::debug!("{symbol}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotecast_core::config::ProviderConfig;
    use quotecast_core::data::SyntheticProvider;
    use std::sync::mpsc;
    use std::time::Duration;

    fn fast_config() -> QuotecastConfig {
        QuotecastConfig {
            seed: Some(7),
            provider: ProviderConfig {
                fetch_delay_ms: 0,
                ..ProviderConfig::default()
            },
            ..QuotecastConfig::default()
        }
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let provider = Box::new(SyntheticProvider::new(1));
        let handle = spawn_worker(cmd_rx, resp_tx, provider, fast_config()).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn forecast_round_trip() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let provider = Box::new(SyntheticProvider::new(1));
        let handle = spawn_worker(cmd_rx, resp_tx, provider, fast_config()).unwrap();

        cmd_tx
            .send(WorkerCommand::Forecast {
                symbol: "AAPL".into(),
                run: 3,
            })
            .unwrap();

        let mut steps = Vec::new();
        let report = loop {
            match resp_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
                WorkerResponse::Progress { step, run, .. } => {
                    assert_eq!(run, 3);
                    steps.push(step);
                }
                WorkerResponse::ForecastReady { report, history, .. } => {
                    assert_eq!(history.symbol, "AAPL");
                    break report;
                }
                other => panic!("unexpected response {other:?}"),
            }
        };
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(report.reference_symbol, "SPY");
        assert_eq!(report.points.len(), 5);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn error_categories() {
        assert_eq!(
            categorize(&DataError::NetworkUnreachable("dns".into())),
            ErrorCategory::Network
        );
        assert_eq!(
            categorize(&DataError::SymbolNotFound { symbol: "X".into() }),
            ErrorCategory::Data
        );
        assert_eq!(categorize(&DataError::Other("?".into())), ErrorCategory::Other);
    }
}
