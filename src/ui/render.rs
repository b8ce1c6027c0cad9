use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{Model, Pane, Tab};

use super::{diff_view, overlays, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let banner_rows = u16::from(model.last_error.is_some());
    let toast_rows = u16::from(model.active_toast().is_some());
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(banner_rows),
        Constraint::Min(0),
        Constraint::Length(toast_rows),
        Constraint::Length(1),
    ])
    .split(area);

    // one diff per frame, shared by the view and the status bar
    let spans = if model.tab == Tab::Diff {
        model.spans()
    } else {
        Vec::new()
    };

    status::render_tab_bar(model, frame, chunks[0]);
    if banner_rows > 0 {
        status::render_error_banner(model, frame, chunks[1]);
    }

    frame.render_widget(Clear, chunks[2]);
    match model.tab {
        Tab::Edit => render_editors(model, frame, chunks[2]),
        Tab::Diff => diff_view::render_diff(model, &spans, frame, chunks[2]),
    }

    if toast_rows > 0 {
        status::render_toast_bar(model, frame, chunks[3]);
    }
    status::render_status_bar(model, &spans, frame, chunks[4]);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editors(model: &Model, frame: &mut Frame, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    render_editor_pane(model, Pane::Original, frame, columns[0]);
    render_editor_pane(model, Pane::Modified, frame, columns[1]);
}

fn render_editor_pane(model: &Model, pane: Pane, frame: &mut Frame, area: Rect) {
    let buf = model.buffer(pane);
    let focused = model.focus == pane;

    let name = match pane {
        Pane::Original => Some(model.original_path.as_path()),
        Pane::Modified => model.modified_path.as_deref(),
    }
    .and_then(|path| path.file_name())
    .map_or_else(
        || "unsaved".to_string(),
        |name| name.to_string_lossy().to_string(),
    );
    let dirty_indicator = if buf.is_dirty() { " [+]" } else { "" };

    let block = Block::default()
        .title(format!(" {}: {name}{dirty_indicator} ", pane.label()))
        .borders(Borders::ALL)
        .border_style(style::border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Line number gutter width
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = usize::from(inner.width.saturating_sub(gutter_width + 1)).max(1);

    let visible_height = usize::from(inner.height);
    let start = model.scroll(pane).min(total_lines.saturating_sub(1));
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();
    // Long lines are not wrapped; shift the pane so the cursor stays visible
    let offset = cursor.col.saturating_sub(text_width - 1);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let chars: Vec<char> = line_text.chars().skip(offset).take(text_width).collect();
        let line_num = format!("{:>width$} ", line_idx + 1, width = usize::from(gutter_width));

        let mut spans = vec![Span::styled(line_num, style::gutter_style())];

        if focused && line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let col = (cursor.col - offset).min(chars.len());
            let before: String = chars[..col].iter().collect();
            let cursor_char = chars.get(col).map_or_else(|| " ".to_string(), char::to_string);
            let after: String = chars.iter().skip(col + 1).collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(cursor_char, style::cursor_style()));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(chars.into_iter().collect::<String>()));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), inner);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
