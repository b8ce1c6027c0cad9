use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Tab, ToastLevel};
use crate::diff::{DiffStats, EditSpan};

use super::style;

pub fn render_tab_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let tab = |label: &'static str, which: Tab| {
        if model.tab == which {
            Span::styled(format!(" {label} "), style::active_tab_style())
        } else {
            Span::raw(format!(" {label} "))
        }
    };

    let mut spans = vec![tab("Edit", Tab::Edit), Span::raw(" "), tab("Diff", Tab::Diff)];
    spans.push(Span::raw(format!("  [{}]", model.granularity.as_str())));
    if model.is_busy() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Rewriting\u{2026}", style::busy_style()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(style::tab_bar_style()),
        area,
    );
}

pub fn render_error_banner(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(err) = &model.last_error else {
        return;
    };
    let banner = Paragraph::new(format!(" {}: {err}  (Esc to dismiss)", err.title()))
        .style(style::error_banner_style());
    frame.render_widget(banner, area);
}

/// `spans` is the current diff on the Diff tab and ignored elsewhere.
pub fn render_status_bar(model: &Model, spans: &[EditSpan], frame: &mut Frame, area: Rect) {
    let status = match model.tab {
        Tab::Edit => {
            let cursor = model.buffer(model.focus).cursor();
            let watch_indicator = if model.watch_enabled {
                " [watching]"
            } else {
                ""
            };
            format!(
                " {}  Ln {}, Col {}{watch_indicator}  Ctrl+R:rewrite  Ctrl+T:diff  F1:help",
                model.focus.label(),
                cursor.line + 1,
                cursor.col + 1,
            )
        }
        Tab::Diff => {
            let stats = DiffStats::from_spans(spans);
            format!(
                " +{} chars  -{} chars  Line {}/{}  c:copy  Ctrl+P:export  Esc:edit",
                stats.added_chars,
                stats.removed_chars,
                model.diff_scroll + 1,
                model.diff_rows(spans),
            )
        }
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
