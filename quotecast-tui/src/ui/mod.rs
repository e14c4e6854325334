//! Top-level UI layout.
//!
//! ```text
//! ┌ Add ───┐┌ Symbols ──────────────────────────┐
//! └────────┘└───────────────────────────────────┘
//! ┌ Chart ─────────────────────────┐┌ Signals ──┐   ← chart split (30–85%)
//! └────────────────────────────────┘└───────────┘
//! ┌ Forecast ─────────────────────────────────────┐
//! └───────────────────────────────────────────────┘
//!  status bar
//! ```

pub mod chart_panel;
pub mod forecast_table;
pub mod help_panel;
pub mod indicator_panel;
pub mod overlays;
pub mod status_bar;
pub mod symbol_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Focus, Overlay};
use crate::theme;

const FORM_WIDTH: u16 = 22;
const SIDEBAR_WIDTH: u16 = 30;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(10)])
        .split(rows[0]);
    symbol_bar::render_form(f, top[0], app);
    symbol_bar::render_chips(f, top[1], app);

    let split = app.chart.split;
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(split),
            Constraint::Percentage(100 - split),
        ])
        .split(rows[1]);

    let chart_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
        .split(body[0]);
    chart_panel::render(f, chart_row[0], app);
    indicator_panel::render(f, chart_row[1], app);
    forecast_table::render(f, body[1], app);

    status_bar::render(f, rows[2], app);

    let main_area = Rect {
        height: rows[0].height + rows[1].height,
        ..f.area()
    };
    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::Help => help_panel::render(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Bordered block whose style follows keyboard focus.
pub fn panel_block(title: String, active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(title)
        .title_style(theme::panel_title(active))
}

pub fn is_focused(app: &AppState, focus: Focus) -> bool {
    app.focus == focus && app.overlay == Overlay::None
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
