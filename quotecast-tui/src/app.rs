//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use quotecast_core::config::QuotecastConfig;
use quotecast_core::domain::{normalize_symbol, PriceSeries};
use quotecast_core::forecast::ForecastReport;

use crate::worker::{WorkerCommand, WorkerResponse};

pub const MAX_ERRORS: usize = 50;
pub const MIN_CHART_SPLIT: u16 = 30;
pub const MAX_CHART_SPLIT: u16 = 85;
pub const DEFAULT_CHART_SPLIT: u16 = 60;
const SPLIT_STEP: u16 = 5;

/// Which area receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Chips,
    Chart,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Form => Focus::Chips,
            Focus::Chips => Focus::Chart,
            Focus::Chart => Focus::Form,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Form => Focus::Chart,
            Focus::Chips => Focus::Form,
            Focus::Chart => Focus::Chips,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Form => "Add",
            Focus::Chips => "Symbols",
            Focus::Chart => "Chart",
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Symbol chips in insertion order with a cursor.
#[derive(Debug, Default)]
pub struct ChipsState {
    pub symbols: Vec<String>,
    pub cursor: usize,
}

impl ChipsState {
    /// Append a symbol. Returns false if it is already present.
    pub fn add(&mut self, symbol: String) -> bool {
        if self.symbols.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        self.cursor = self.symbols.len() - 1;
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.symbols.get(self.cursor).map(String::as_str)
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.symbols.len() {
            self.cursor += 1;
        }
    }

    /// Remove the chip under the cursor, keeping the cursor in range.
    pub fn remove_selected(&mut self) -> Option<String> {
        if self.symbols.is_empty() {
            return None;
        }
        let removed = self.symbols.remove(self.cursor);
        if self.cursor >= self.symbols.len() {
            self.cursor = self.symbols.len().saturating_sub(1);
        }
        Some(removed)
    }
}

/// Everything the chart needs for one symbol.
#[derive(Debug, Clone)]
pub struct SymbolView {
    pub history: PriceSeries,
    pub report: ForecastReport,
}

/// Per-symbol fetch lifecycle.
#[derive(Debug, Clone)]
pub enum FetchState {
    Loading { step: usize, total: usize },
    Ready(Box<SymbolView>),
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }
}

/// Chart panel state.
#[derive(Debug)]
pub struct ChartState {
    /// Symbol shown on the chart.
    pub focused: Option<String>,
    /// Chart share of the vertical space, in percent.
    pub split: u16,
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            focused: None,
            split: DEFAULT_CHART_SPLIT,
        }
    }

    pub fn grow(&mut self) {
        self.set_split(self.split.saturating_add(SPLIT_STEP));
    }

    pub fn shrink(&mut self) {
        self.set_split(self.split.saturating_sub(SPLIT_STEP));
    }

    pub fn set_split(&mut self, split: u16) {
        self.split = split.clamp(MIN_CHART_SPLIT, MAX_CHART_SPLIT);
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub focus: Focus,
    pub running: bool,

    pub input: String,
    pub chips: ChipsState,
    pub chart: ChartState,
    pub views: HashMap<String, FetchState>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    /// Monotonic request counter; stale responses are dropped.
    next_run: u64,
    pending: HashMap<String, u64>,

    // Cross-cutting
    pub config: QuotecastConfig,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        config: QuotecastConfig,
    ) -> Self {
        Self {
            focus: Focus::Form,
            running: true,
            input: String::new(),
            chips: ChipsState::default(),
            chart: ChartState::new(),
            views: HashMap::new(),
            worker_tx,
            worker_rx,
            next_run: 0,
            pending: HashMap::new(),
            config,
            status_message: None,
            error_history: VecDeque::with_capacity(MAX_ERRORS),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Push an error to the history, capping at `MAX_ERRORS`.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        self.error_history.truncate(MAX_ERRORS);
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Symbol form submit: validate, add a chip, schedule a forecast.
    pub fn submit_form(&mut self) {
        let raw = std::mem::take(&mut self.input);
        let symbol = match normalize_symbol(&raw) {
            Ok(s) => s,
            Err(e) => {
                self.push_error(ErrorCategory::Input, e.to_string(), raw);
                return;
            }
        };
        if !self.chips.add(symbol.clone()) {
            self.set_warning(format!("{symbol} is already on the list"));
            return;
        }
        if self.chart.focused.is_none() {
            self.chart.focused = Some(symbol.clone());
        }
        self.request_forecast(&symbol);
    }

    /// Add a restored symbol without touching the form.
    pub fn restore_symbol(&mut self, raw: &str) {
        match normalize_symbol(raw) {
            Ok(symbol) => {
                if self.chips.add(symbol.clone()) && self.chart.focused.is_none() {
                    self.chart.focused = Some(symbol);
                }
            }
            Err(e) => log::warn!("dropping saved symbol {raw:?}: {e}"),
        }
    }

    /// Send a forecast command for `symbol` and mark it loading.
    pub fn request_forecast(&mut self, symbol: &str) {
        let run = self.next_run;
        self.next_run += 1;
        let cmd = WorkerCommand::Forecast {
            symbol: symbol.to_string(),
            run,
        };
        if self.worker_tx.send(cmd).is_err() {
            self.push_error(
                ErrorCategory::Other,
                "background worker is not running".into(),
                symbol.to_string(),
            );
            return;
        }
        self.pending.insert(symbol.to_string(), run);
        self.views
            .insert(symbol.to_string(), FetchState::Loading { step: 0, total: 2 });
        self.set_status(format!("Fetching {symbol}..."));
    }

    pub fn refresh_all(&mut self) {
        let symbols = self.chips.symbols.clone();
        for symbol in &symbols {
            self.request_forecast(symbol);
        }
    }

    /// Remove the selected chip and drop its cached data.
    pub fn remove_selected_chip(&mut self) {
        let Some(symbol) = self.chips.remove_selected() else {
            return;
        };
        self.views.remove(&symbol);
        self.pending.remove(&symbol);
        if self.chart.focused.as_deref() == Some(symbol.as_str()) {
            self.chart.focused = self.chips.selected().map(str::to_string);
        }
        self.set_status(format!("Removed {symbol}"));
    }

    pub fn focus_selected_chip(&mut self) {
        if let Some(symbol) = self.chips.selected() {
            self.chart.focused = Some(symbol.to_string());
            self.focus = Focus::Chart;
        }
    }

    /// State of the symbol shown on the chart.
    pub fn focused_view(&self) -> Option<(&str, &FetchState)> {
        let symbol = self.chart.focused.as_deref()?;
        self.views.get(symbol).map(|state| (symbol, state))
    }

    /// Whether a response still belongs to the latest request for its symbol.
    fn is_current(&self, symbol: &str, run: u64) -> bool {
        self.pending.get(symbol) == Some(&run)
    }

    /// Fold a worker response into the state.
    pub fn apply_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Progress {
                symbol,
                run,
                step,
                total,
            } => {
                if self.is_current(&symbol, run) {
                    self.views
                        .insert(symbol, FetchState::Loading { step, total });
                }
            }
            WorkerResponse::ForecastReady {
                symbol,
                run,
                history,
                report,
            } => {
                if !self.is_current(&symbol, run) {
                    log::debug!("dropping stale forecast for {symbol} (run {run})");
                    return;
                }
                self.pending.remove(&symbol);
                if report.insufficient_history() {
                    self.set_warning(format!(
                        "{symbol}: only {} closes, need {} to forecast",
                        report.history_len, self.config.forecast.min_history
                    ));
                } else {
                    self.set_status(format!(
                        "{symbol}: {} day forecast ready",
                        report.points.len()
                    ));
                }
                self.views.insert(
                    symbol,
                    FetchState::Ready(Box::new(SymbolView {
                        history: *history,
                        report: *report,
                    })),
                );
            }
            WorkerResponse::ForecastFailed {
                symbol,
                run,
                category,
                message,
            } => {
                if !self.is_current(&symbol, run) {
                    return;
                }
                self.pending.remove(&symbol);
                self.views
                    .insert(symbol.clone(), FetchState::Failed(message.clone()));
                self.push_error(category, message, symbol);
            }
        }
    }
}
