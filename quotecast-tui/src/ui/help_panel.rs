//! Help overlay: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "Tab / Shift+Tab", "Cycle focus: form, symbols, chart");
    key(&mut lines, "a or /", "Jump to the symbol form");
    key(&mut lines, "+ / -", "Grow / shrink the chart");
    key(&mut lines, "R", "Refresh every symbol");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Symbol form");
    key(&mut lines, "Enter", "Add the symbol and fetch its forecast");
    key(&mut lines, "Esc", "Clear and move to the symbols");
    lines.push(Line::from(""));

    section(&mut lines, "Symbols");
    key(&mut lines, "h / l", "Move between chips");
    key(&mut lines, "d / Delete", "Remove the chip and its data");
    key(&mut lines, "Enter", "Show the chip on the chart");
    key(&mut lines, "r", "Refetch the selected symbol");
    lines.push(Line::from(""));

    section(&mut lines, "Chart");
    key(&mut lines, "h / l", "Previous / next symbol");
    key(&mut lines, "r", "Refetch the charted symbol");
    lines.push(Line::from(""));

    section(&mut lines, "Forecast");
    lines.push(Line::from(Span::styled(
        "  Blend of mean reversion to MA20/MA50, RSI, market correlation and",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  decaying momentum, plus volatility-scaled noise. A heuristic, not advice.",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>16}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
