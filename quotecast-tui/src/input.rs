//! Keyboard input dispatch: overlays → global keys → focused area.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome | Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Focus cycling works everywhere.
    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    // 3. The form takes every printable key, so globals come after it.
    if app.focus == Focus::Form {
        handle_form_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.chart.grow();
            return;
        }
        KeyCode::Char('-') => {
            app.chart.shrink();
            return;
        }
        KeyCode::Char('a') | KeyCode::Char('/') => {
            app.focus = Focus::Form;
            return;
        }
        KeyCode::Char('R') => {
            app.refresh_all();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Chips => handle_chips_key(app, key),
        Focus::Chart => handle_chart_key(app, key),
        Focus::Form => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => {
            app.input.clear();
            app.focus = Focus::Chips;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !c.is_whitespace() => {
            app.input.push(c.to_ascii_uppercase());
        }
        _ => {}
    }
}

fn handle_chips_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.chips.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.chips.move_right(),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => app.remove_selected_chip(),
        KeyCode::Enter => app.focus_selected_chip(),
        KeyCode::Char('r') => {
            if let Some(symbol) = app.chips.selected().map(str::to_string) {
                app.request_forecast(&symbol);
            }
        }
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        // Step the chart through the chips without leaving chart focus.
        KeyCode::Char('h') | KeyCode::Left => {
            app.chips.move_left();
            app.chart.focused = app.chips.selected().map(str::to_string);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.chips.move_right();
            app.chart.focused = app.chips.selected().map(str::to_string);
        }
        KeyCode::Char('r') => {
            if let Some(symbol) = app.chart.focused.clone() {
                app.request_forecast(&symbol);
            }
        }
        KeyCode::Esc => app.focus = Focus::Chips,
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
