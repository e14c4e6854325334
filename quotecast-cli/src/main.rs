//! Quotecast CLI: fetch quotes, inspect indicators, project forecasts.
//!
//! Commands:
//! - `forecast`: fetch target + reference, print a dated price forecast
//! - `indicators`: print the indicator snapshot a forecast would use
//! - `fetch`: print validated daily closes for one symbol
//!
//! Every command accepts `--json` for machine-readable output and
//! `--synthetic` for offline, seeded random-walk quotes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use quotecast_core::config::QuotecastConfig;
use quotecast_core::data::{
    build_provider, fetch_pair, fetch_series, DataProvider, DownloadProgress, LogProgress,
    PairRequest, StdoutProgress,
};
use quotecast_core::domain::{normalize_symbol, MarketPair};
use quotecast_core::forecast::{build_report, EntropyNoise, ForecastReport, Projector};
use quotecast_core::indicators::IndicatorSnapshot;
use quotecast_core::rng::SeedDeriver;

#[derive(Parser)]
#[command(
    name = "quotecast",
    about = "Quotecast CLI: short-horizon stock price forecasts from technical indicators"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch quotes and project the next trading days.
    Forecast {
        #[command(flatten)]
        common: CommonArgs,

        /// Trading days to project. Defaults to the config value (5).
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        horizon: Option<usize>,
    },
    /// Print the indicator snapshot behind a forecast.
    Indicators {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print validated daily closes for a symbol.
    Fetch {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Ticker symbol (e.g., AAPL, BRK.B, ^GSPC).
    symbol: String,

    /// Market reference symbol. Defaults to the config value (SPY).
    #[arg(long)]
    reference: Option<String>,

    /// Master seed for reproducible forecasts and synthetic quotes.
    #[arg(long)]
    seed: Option<u64>,

    /// Use seeded synthetic quotes instead of the network.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Last date of history (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Calendar days of history to request.
    #[arg(long)]
    days: Option<i64>,

    /// Emit JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Path to a TOML config file.
    #[arg(long, default_value = "quotecast.toml")]
    config: PathBuf,
}

/// Everything a command needs after flags are merged into the config.
struct Session {
    symbol: String,
    config: QuotecastConfig,
    provider: Box<dyn DataProvider>,
    end: NaiveDate,
    json: bool,
}

impl Session {
    fn open(common: CommonArgs) -> Result<Self> {
        let symbol = normalize_symbol(&common.symbol)?;
        let mut config = QuotecastConfig::load(&common.config)?;
        if let Some(reference) = &common.reference {
            config.provider.reference_symbol = normalize_symbol(reference)?;
        }
        if let Some(days) = common.days {
            config.provider.history_days = days;
        }
        if common.seed.is_some() {
            config.seed = common.seed;
        }
        config.validate()?;

        let end = common
            .end
            .as_deref()
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .context("--end must be YYYY-MM-DD")?
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let synthetic_seed = common.synthetic.then(|| config.seed.unwrap_or(0));
        let provider = build_provider(&config.provider, synthetic_seed)?;
        log::debug!("using provider {} for {symbol}", provider.name());

        Ok(Self {
            symbol,
            config,
            provider,
            end,
            json: common.json,
        })
    }

    fn progress(&self) -> Box<dyn DownloadProgress> {
        if self.json {
            Box::new(LogProgress)
        } else {
            Box::new(StdoutProgress)
        }
    }

    fn fetch_pair(&self) -> Result<MarketPair> {
        let request = PairRequest::from_config(&self.symbol, &self.config.provider, self.end);
        let progress = self.progress();
        Ok(fetch_pair(self.provider.as_ref(), &request, progress.as_ref())?)
    }

    fn projector(&self) -> Projector {
        Projector::new(self.config.forecast.clone())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast { common, horizon } => run_forecast(Session::open(common)?, horizon),
        Commands::Indicators { common } => run_indicators(Session::open(common)?),
        Commands::Fetch { common } => run_fetch(Session::open(common)?),
    }
}

fn run_forecast(session: Session, horizon: Option<usize>) -> Result<()> {
    let horizon = horizon.unwrap_or(session.config.horizon_days);
    let pair = session.fetch_pair()?;
    let projector = session.projector();

    let report = match session.config.seed {
        Some(seed) => {
            let mut noise = SeedDeriver::new(seed).noise_for(&session.symbol, 0);
            build_report(&pair, &projector, horizon, &mut noise)
        }
        None => build_report(&pair, &projector, horizon, &mut EntropyNoise::new()),
    };

    if session.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, projector.config().min_history);
    }
    Ok(())
}

fn run_indicators(session: Session) -> Result<()> {
    let pair = session.fetch_pair()?;
    let projector = session.projector();
    let snapshot = projector.snapshot(&pair.target.closes, &pair.reference.closes);

    if session.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    match snapshot {
        Some(snap) => print_snapshot(&snap, &pair.reference.symbol, &projector),
        None => println!(
            "{}: {} closes, need {} for indicators",
            pair.target.symbol,
            pair.target.len(),
            projector.config().min_history
        ),
    }
    Ok(())
}

fn run_fetch(session: Session) -> Result<()> {
    let start = session.end - chrono::Duration::days(session.config.provider.history_days);
    let series = fetch_series(session.provider.as_ref(), &session.symbol, start, session.end)?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }
    println!("{} ({} closes)", series.symbol, series.len());
    println!("{:<12} {:>12}", "Date", "Close");
    println!("{}", "-".repeat(25));
    for (date, close) in series.dates.iter().zip(&series.closes) {
        println!("{:<12} {:>12.2}", date, close);
    }
    Ok(())
}

fn print_report(report: &ForecastReport, min_history: usize) {
    println!();
    println!("=== Forecast: {} vs {} ===", report.symbol, report.reference_symbol);
    if let (Some(close), Some(date)) = (report.last_close, report.last_date) {
        println!("Last close:     {close:.2} on {date}");
    }
    println!("History:        {} closes", report.history_len);

    if report.insufficient_history() {
        println!();
        println!("Not enough history to forecast (need {min_history} closes).");
        return;
    }
    if let Some(bound) = report.daily_bound {
        println!("Daily cap:      ±{:.2}%", bound * 100.0);
    }
    println!();
    println!("{:<5} {:<12} {:>10} {:>9}", "Day", "Date", "Price", "Change");
    println!("{}", "-".repeat(39));
    for p in &report.points {
        println!(
            "{:<5} {:<12} {:>10.2} {:>8.2}%",
            format!("+{}", p.point.day),
            p.date,
            p.point.price,
            p.point.change * 100.0
        );
    }
    println!();
    println!("Heuristic projection only, not investment advice.");
}

fn print_snapshot(snap: &IndicatorSnapshot, reference: &str, projector: &Projector) {
    let cfg = projector.config();
    println!();
    println!("--- Indicators ---");
    println!("RSI({}):        {:.2}", cfg.rsi_period, snap.rsi);
    println!("MA{}:           {:.2}", cfg.ma_short_period, snap.ma_short);
    println!("MA{}:           {:.2}", cfg.ma_long_period, snap.ma_long);
    println!("Momentum({}):   {:+.4}%", cfg.momentum_period, snap.momentum * 100.0);
    println!("Volatility({}): {:.4}%", cfg.volatility_window, snap.volatility * 100.0);
    println!("Corr vs {reference}:  {:+.4}", snap.correlation);
    println!("{reference} last return: {:+.4}%", snap.reference_return * 100.0);
    println!("Daily cap:      ±{:.2}%", snap.daily_bound(cfg) * 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_forecast_flags() {
        let cli = Cli::try_parse_from([
            "quotecast", "forecast", "aapl", "--reference", "QQQ", "--horizon", "10", "--seed",
            "42", "--synthetic", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Forecast { common, horizon } => {
                assert_eq!(common.symbol, "aapl");
                assert_eq!(common.reference.as_deref(), Some("QQQ"));
                assert_eq!(horizon, Some(10));
                assert_eq!(common.seed, Some(42));
                assert!(common.synthetic);
                assert!(common.json);
            }
            _ => panic!("expected forecast"),
        }
    }

    #[test]
    fn zero_horizon_is_rejected() {
        assert!(Cli::try_parse_from(["quotecast", "forecast", "SPY", "--horizon", "0"]).is_err());
        assert!(Cli::try_parse_from(["quotecast", "forecast", "SPY", "--horizon", "1"]).is_ok());
    }

    #[test]
    fn horizon_only_on_forecast() {
        assert!(Cli::try_parse_from(["quotecast", "fetch", "SPY", "--horizon", "3"]).is_err());
    }

    fn synthetic_session(symbol: &str, extra: &[&str]) -> Session {
        let mut args = vec!["quotecast", "indicators", symbol, "--synthetic", "--seed", "9"];
        args.extend_from_slice(extra);
        args.extend_from_slice(&["--config", "/nonexistent/quotecast.toml"]);
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Indicators { common } => Session::open(common).unwrap(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn session_merges_flags_into_config() {
        let session = synthetic_session(
            "msft",
            &["--reference", "qqq", "--days", "200", "--end", "2024-06-28"],
        );
        assert_eq!(session.symbol, "MSFT");
        assert_eq!(session.config.provider.reference_symbol, "QQQ");
        assert_eq!(session.config.provider.history_days, 200);
        assert_eq!(session.config.seed, Some(9));
        assert_eq!(session.end, NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
        assert_eq!(session.provider.name(), "synthetic");
    }

    #[test]
    fn synthetic_pair_is_reproducible() {
        let session = synthetic_session("AAPL", &["--end", "2024-06-28", "--json"]);
        let a = session.fetch_pair().unwrap();
        let b = session.fetch_pair().unwrap();
        assert_eq!(a.target, b.target);
        assert_eq!(a.reference.symbol, "SPY");
        assert!(session
            .projector()
            .snapshot(&a.target.closes, &a.reference.closes)
            .is_some());
    }

    #[test]
    fn invalid_symbol_is_rejected() {
        let cli = Cli::try_parse_from(["quotecast", "fetch", "no way", "--synthetic"]).unwrap();
        match cli.command {
            Commands::Fetch { common } => assert!(Session::open(common).is_err()),
            _ => unreachable!(),
        }
    }
}
