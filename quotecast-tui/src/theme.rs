//! Parrot/neon color tokens and style helpers.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights, history line)
//! - **Forecast**: Neon orange (projected prices)
//! - **Positive**: Neon green (up moves)
//! - **Negative**: Hot pink (down moves, errors)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const FORECAST: Color = Color::Rgb(255, 140, 0);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn forecast() -> Style {
    Style::default().fg(FORECAST)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Chip style: selected chips are reversed, loading chips are dimmed.
pub fn chip(selected: bool, loading: bool) -> Style {
    let base = if loading { muted() } else { accent() };
    if selected {
        base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        base
    }
}

/// Green for gains, pink for losses, purple for flat.
pub fn change_color(value: f64) -> Style {
    if value > 0.0 {
        positive()
    } else if value < 0.0 {
        negative()
    } else {
        neutral()
    }
}

/// RSI coloring: overbought pink, oversold green.
pub fn rsi_color(rsi: f64) -> Style {
    match rsi {
        r if r >= 70.0 => negative(),
        r if r <= 30.0 => positive(),
        _ => text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_colors() {
        assert_eq!(change_color(0.01), positive());
        assert_eq!(change_color(-0.01), negative());
        assert_eq!(change_color(0.0), neutral());
    }

    #[test]
    fn rsi_colors() {
        assert_eq!(rsi_color(75.0), negative());
        assert_eq!(rsi_color(70.0), negative());
        assert_eq!(rsi_color(25.0), positive());
        assert_eq!(rsi_color(50.0), text());
    }

    #[test]
    fn border_follows_focus() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
    }

    #[test]
    fn selected_chip_is_reversed() {
        assert!(chip(true, false).add_modifier.contains(Modifier::REVERSED));
        assert!(!chip(false, false).add_modifier.contains(Modifier::REVERSED));
    }
}
