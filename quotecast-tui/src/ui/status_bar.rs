//! Bottom status bar: focus, key hints, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let hints = match app.focus {
        Focus::Form => "Enter:add Esc:chips Tab:next ^C:quit",
        Focus::Chips => "h/l:move d:remove Enter:chart r:refresh +/-:resize ?:help q:quit",
        Focus::Chart => "h/l:symbol r:refresh +/-:resize e:errors ?:help q:quit",
    };

    let mut spans: Vec<Span> = vec![
        Span::styled(format!(" [{}] ", app.focus.label()), theme::accent_bold()),
        Span::styled(hints, theme::muted()),
        Span::raw(" | "),
    ];

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
