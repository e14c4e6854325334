//! Indicator sidebar: the frozen snapshot behind the current forecast.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, FetchState};
use crate::theme;
use crate::ui::panel_block;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = panel_block(" Signals ".into(), false);

    let view = match app.focused_view() {
        Some((_, FetchState::Ready(view))) => view,
        _ => {
            let hint = Span::styled("No data", theme::muted());
            f.render_widget(Paragraph::new(hint).block(block), area);
            return;
        }
    };
    let report = &view.report;

    let mut lines: Vec<Line> = Vec::new();
    if let Some(close) = report.last_close {
        row(&mut lines, "Last", format!("{close:.2}"), theme::text());
    }
    if let Some(date) = report.last_date {
        row(&mut lines, "As of", date.to_string(), theme::muted());
    }
    lines.push(Line::from(""));

    let Some(snap) = &report.snapshot else {
        lines.push(Line::from(Span::styled(
            format!(
                "Need {} closes, have {}",
                app.config.forecast.min_history, report.history_len
            ),
            theme::warning(),
        )));
        f.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let cfg = &app.config.forecast;
    row(
        &mut lines,
        &format!("RSI {}", cfg.rsi_period),
        format!("{:.1}", snap.rsi),
        theme::rsi_color(snap.rsi),
    );
    row(
        &mut lines,
        &format!("MA{}", cfg.ma_short_period),
        format!("{:.2}", snap.ma_short),
        theme::text(),
    );
    row(
        &mut lines,
        &format!("MA{}", cfg.ma_long_period),
        format!("{:.2}", snap.ma_long),
        theme::text(),
    );
    row(
        &mut lines,
        "Momentum",
        pct(snap.momentum),
        theme::change_color(snap.momentum),
    );
    row(&mut lines, "Volatility", pct(snap.volatility), theme::neutral());
    row(
        &mut lines,
        &format!("Corr {}", report.reference_symbol),
        format!("{:+.2}", snap.correlation),
        theme::change_color(snap.correlation),
    );
    row(
        &mut lines,
        &format!("{} last", report.reference_symbol),
        pct(snap.reference_return),
        theme::change_color(snap.reference_return),
    );
    if let Some(bound) = report.daily_bound {
        row(&mut lines, "Daily cap", format!("±{:.2}%", bound * 100.0), theme::muted());
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn pct(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

fn row(lines: &mut Vec<Line<'_>>, label: &str, value: String, style: Style) {
    lines.push(Line::from(vec![
        Span::styled(format!(" {label:<12}"), theme::muted()),
        Span::styled(value, style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{ready, test_app};
    use crate::ui::tests::render_to_string;

    #[test]
    fn pct_formatting() {
        assert_eq!(pct(0.0123), "+1.23%");
        assert_eq!(pct(-0.5), "-50.00%");
    }

    #[test]
    fn snapshot_rows_render() {
        let (mut app, _rx, _tx) = test_app();
        app.input = "AAPL".into();
        app.submit_form();
        app.apply_response(ready("AAPL", 0, 80));
        let screen = render_to_string(&app, 120, 40);
        for label in ["RSI 14", "MA20", "MA50", "Momentum", "Volatility", "Corr SPY", "Daily cap"] {
            assert!(screen.contains(label), "missing {label}");
        }
    }

    #[test]
    fn short_history_explains_itself() {
        let (mut app, _rx, _tx) = test_app();
        app.input = "IPO".into();
        app.submit_form();
        app.apply_response(ready("IPO", 0, 20));
        let screen = render_to_string(&app, 120, 40);
        assert!(screen.contains("Need 50 closes, have 20"));
    }
}
