//! Dated forecast table under the chart.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{AppState, FetchState};
use crate::theme;
use crate::ui::panel_block;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let report = match app.focused_view() {
        Some((_, FetchState::Ready(view))) => &view.report,
        _ => {
            let block = panel_block(" Forecast ".into(), false);
            let hint = Span::styled("No forecast yet", theme::muted());
            f.render_widget(Paragraph::new(hint).block(block), area);
            return;
        }
    };

    let title = format!(
        " Forecast {} · {} trading days ",
        report.symbol,
        report.points.len()
    );
    let block = panel_block(title, false);

    if report.points.is_empty() {
        let hint = Span::styled("Not enough history to forecast", theme::warning());
        f.render_widget(Paragraph::new(hint).block(block), area);
        return;
    }

    let base = report.last_close.unwrap_or(0.0);
    let rows: Vec<Row> = report
        .points
        .iter()
        .map(|p| {
            let total = if base > 0.0 {
                p.point.price / base - 1.0
            } else {
                0.0
            };
            Row::new(vec![
                Cell::from(format!("+{}", p.point.day)).style(theme::muted()),
                Cell::from(p.date.format("%a %Y-%m-%d").to_string()),
                Cell::from(format!("{:.2}", p.point.price)).style(theme::forecast()),
                Cell::from(format!("{:+.2}%", p.point.change * 100.0))
                    .style(theme::change_color(p.point.change)),
                Cell::from(format!("{:+.2}%", total * 100.0)).style(theme::change_color(total)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Day", "Date", "Price", "Change", "Total"]).style(theme::accent_bold());
    let widths = [
        Constraint::Length(5),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use crate::app::tests::{ready, test_app};
    use crate::ui::tests::render_to_string;

    #[test]
    fn table_lists_every_point() {
        let (mut app, _rx, _tx) = test_app();
        app.input = "AAPL".into();
        app.submit_form();
        app.apply_response(ready("AAPL", 0, 80));
        let screen = render_to_string(&app, 120, 40);
        assert!(screen.contains("Forecast AAPL · 5 trading days"));
        for day in 1..=5 {
            assert!(screen.contains(&format!("+{day} ")), "missing day {day}");
        }
    }
}
