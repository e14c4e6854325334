//! Symbol form and chip strip.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, FetchState, Focus};
use crate::theme;
use crate::ui::{is_focused, panel_block};

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let active = is_focused(app, Focus::Form);
    let block = panel_block(" Add [Enter] ".into(), active);

    let mut spans = vec![
        Span::styled("> ", theme::accent()),
        Span::styled(app.input.as_str(), theme::accent_bold()),
    ];
    if active {
        spans.push(Span::styled("_", theme::accent()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn render_chips(f: &mut Frame, area: Rect, app: &AppState) {
    let active = is_focused(app, Focus::Chips);
    let title = format!(" Symbols ({}) ", app.chips.symbols.len());
    let block = panel_block(title, active);

    if app.chips.symbols.is_empty() {
        let hint = Span::styled("Type a ticker in the form and press Enter", theme::muted());
        f.render_widget(Paragraph::new(hint).block(block), area);
        return;
    }

    let mut spans = Vec::new();
    for (i, symbol) in app.chips.symbols.iter().enumerate() {
        let state = app.views.get(symbol);
        let loading = state.is_some_and(FetchState::is_loading);
        let selected = active && i == app.chips.cursor;
        let marker = match state {
            Some(FetchState::Failed(_)) => "!",
            Some(FetchState::Loading { .. }) => "…",
            _ if app.chart.focused.as_deref() == Some(symbol.as_str()) => "*",
            _ => "",
        };
        let style = match state {
            Some(FetchState::Failed(_)) if !selected => theme::negative(),
            _ => theme::chip(selected, loading),
        };
        spans.push(Span::styled(format!(" {symbol}{marker} "), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
