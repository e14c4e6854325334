//! UI preferences persistence: JSON save/load across restarts.
//!
//! Only the symbol list and layout survive a restart; fetched quotes and
//! forecasts are always refetched.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppState, Overlay, DEFAULT_CHART_SPLIT};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub symbols: Vec<String>,
    pub chart_split: u16,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            chart_split: DEFAULT_CHART_SPLIT,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt state file {}: {e}", path.display());
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        symbols: app.chips.symbols.clone(),
        chart_split: app.chart.split,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState. Restored symbols are not fetched here.
pub fn apply(app: &mut AppState, state: PersistedState) {
    for symbol in &state.symbols {
        app.restore_symbol(symbol);
    }
    app.chips.cursor = 0;
    app.chart.set_split(state.chart_split);
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
