//! Price chart: close history with the forecast overlaid past the last close.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, FetchState, Focus, SymbolView};
use crate::theme;
use crate::ui::{is_focused, panel_block};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = is_focused(app, Focus::Chart);

    let Some((symbol, state)) = app.focused_view() else {
        let block = panel_block(" Chart ".into(), active);
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Add a symbol, then press Enter on its chip to chart it.",
                theme::muted(),
            )),
        ])
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    match state {
        FetchState::Loading { step, total } => {
            let block = panel_block(format!(" {symbol} "), active);
            let text = Span::styled(
                format!("Fetching quotes ({step}/{total})..."),
                theme::neutral(),
            );
            f.render_widget(Paragraph::new(text).block(block), area);
        }
        FetchState::Failed(message) => {
            let block = panel_block(format!(" {symbol} "), active);
            let text = vec![
                Line::from(Span::styled("Fetch failed", theme::negative())),
                Line::from(Span::styled(message.as_str(), theme::muted())),
                Line::from(Span::styled("Press r to retry.", theme::muted())),
            ];
            let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        FetchState::Ready(view) => render_chart(f, area, view, active),
    }
}

/// History and forecast as `(x, y)` series sharing one x axis.
///
/// The forecast series starts at the last close so the two lines join.
pub fn chart_series(view: &SymbolView) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let history: Vec<(f64, f64)> = view
        .history
        .closes
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as f64, c))
        .collect();

    let mut forecast = Vec::with_capacity(view.report.points.len() + 1);
    if let Some(&(x0, y0)) = history.last() {
        if !view.report.points.is_empty() {
            forecast.push((x0, y0));
            forecast.extend(
                view.report
                    .points
                    .iter()
                    .map(|p| (x0 + p.point.day as f64, p.point.price)),
            );
        }
    }
    (history, forecast)
}

/// Y bounds over both series with 5% padding.
fn y_bounds(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.iter().map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let range = hi - lo;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
    [lo - pad, hi + pad]
}

fn render_chart(f: &mut Frame, area: Rect, view: &SymbolView, active: bool) {
    let report = &view.report;
    let (history, forecast) = chart_series(view);
    let [y_min, y_max] = y_bounds(&[history.as_slice(), forecast.as_slice()]);
    let x_max = history
        .len()
        .saturating_sub(1)
        .saturating_add(report.points.len()) as f64;

    let mut title = format!(" {} vs {} ", report.symbol, report.reference_symbol);
    if report.insufficient_history() {
        title.push_str("| not enough history to forecast ");
    }
    let block = panel_block(title, active);

    let mut datasets = vec![Dataset::default()
        .name("Close")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&history)];
    if !forecast.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Forecast")
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::FORECAST))
                .graph_type(GraphType::Line)
                .data(&forecast),
        );
    }

    let first_date = view.history.dates.first();
    let last_date = report
        .points
        .last()
        .map(|p| p.date)
        .or(view.history.last_date());
    let x_labels: Vec<Span> = [first_date.copied(), view.history.last_date(), last_date]
        .into_iter()
        .flatten()
        .map(|d| Span::styled(d.format("%m-%d").to_string(), theme::muted()))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
