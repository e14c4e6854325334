//! Quotecast TUI: symbol form, chips, and a resizable forecast chart.
//!
//! Layout:
//! 1. Form: type a ticker, Enter adds it
//! 2. Chips: the watched symbols; select, remove, refresh
//! 3. Chart: close history with the forecast overlay and indicator sidebar
//! 4. Forecast table: dated projected closes
//!
//! Logs go to `quotecast.log` in the config directory (`RUST_LOG` applies).
//! Pass `--synthetic` to use seeded random-walk quotes instead of the network.

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use quotecast_core::config::QuotecastConfig;
use quotecast_core::data::build_provider;

use crate::app::AppState;
use crate::worker::WorkerCommand;

fn main() -> Result<()> {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotecast");
    init_logging(&config_dir);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = config_dir.join("state.json");
    let config = QuotecastConfig::load(&config_dir.join("config.toml"))
        .context("failed to load config.toml")?;
    let synthetic_seed = std::env::args()
        .any(|a| a == "--synthetic")
        .then(|| config.seed.unwrap_or(0));

    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let provider = build_provider(&config.provider, synthetic_seed)?;
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, provider, config.clone())
        .context("failed to spawn worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, config);
    persistence::apply(&mut app, persisted);
    app.refresh_all();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    if let Err(e) = persistence::save(&state_path, &persistence::extract(&app)) {
        log::warn!("failed to save UI state: {e:#}");
    }

    // Restore the terminal before waiting on the worker: an in-flight fetch
    // can take up to the provider timeout to finish.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    drop(app);
    let _ = worker_handle.join();

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Route `env_logger` into a file so log lines never hit the alternate screen.
fn init_logging(config_dir: &Path) {
    let file = std::fs::create_dir_all(config_dir)
        .and_then(|_| File::create(config_dir.join("quotecast.log")));
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // No writable log file: stay silent rather than corrupt the screen.
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}
