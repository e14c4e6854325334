//! Overlay widgets: welcome and error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to Quotecast ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Type a ticker (AAPL, BRK.B, ^GSPC) and press Enter",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Tab to the symbols, Enter charts the selected chip",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. + and - resize the chart, ? lists every key",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use crate::app::tests::test_app;
    use crate::app::{ErrorCategory, Overlay};
    use crate::ui::tests::render_to_string;

    #[test]
    fn error_history_lists_newest_first() {
        let (mut app, _rx, _tx) = test_app();
        app.push_error(ErrorCategory::Network, "first".into(), "AAPL".into());
        app.push_error(ErrorCategory::Data, "second".into(), "MSFT".into());
        app.overlay = Overlay::ErrorHistory;

        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Error History (2)"));
        let first = screen.find("[NET] first").unwrap();
        let second = screen.find("[DATA] second").unwrap();
        assert!(second < first);
    }

    #[test]
    fn welcome_and_help_render() {
        let (mut app, _rx, _tx) = test_app();
        app.overlay = Overlay::Welcome;
        assert!(render_to_string(&app, 100, 30).contains("Welcome to Quotecast"));
        app.overlay = Overlay::Help;
        assert!(render_to_string(&app, 100, 40).contains("Cycle focus"));
    }
}
