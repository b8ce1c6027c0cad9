//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::diff::SpanKind;

/// Style for a diff span in the terminal view.
///
/// Mirrors the exported markup: additions get a yellow background,
/// removals are red and crossed out.
pub fn style_for_span(kind: SpanKind) -> Style {
    match kind {
        SpanKind::Unchanged => Style::default(),
        SpanKind::Added => Style::default().bg(Color::Yellow).fg(Color::Black),
        SpanKind::Removed => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::CROSSED_OUT),
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn cursor_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn busy_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn error_banner_style() -> Style {
    Style::default().bg(Color::Red).fg(Color::White)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}
