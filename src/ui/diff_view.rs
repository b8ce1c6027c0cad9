use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::Model;
use crate::diff::{DiffStats, EditSpan, SpanKind};

use super::style;

/// Marker drawn where a changed span contains a line break.
pub const NEWLINE_MARKER: &str = "\u{21b5}";

/// Turn diff spans into styled terminal lines.
///
/// A span may cross line breaks, so each one is split on `\n`. Breaks that
/// are themselves added or removed get a visible marker; otherwise a
/// deleted blank line would be invisible.
pub fn diff_lines(spans: &[EditSpan]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for span in spans {
        let style = style::style_for_span(span.kind);
        let mut segments = span.text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                current.push(Span::styled(segment.to_string(), style));
            }
            if segments.peek().is_some() {
                if span.kind != SpanKind::Unchanged {
                    current.push(Span::styled(NEWLINE_MARKER, style));
                }
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

pub fn render_diff(model: &Model, spans: &[EditSpan], frame: &mut Frame, area: Rect) {
    let stats = DiffStats::from_spans(spans);

    let legend = Line::from(vec![
        Span::raw(" "),
        Span::styled("added", style::style_for_span(SpanKind::Added)),
        Span::raw("  "),
        Span::styled("removed", style::style_for_span(SpanKind::Removed)),
        Span::raw(" "),
    ]);
    let summary = if stats.is_identical() {
        " no changes ".to_string()
    } else {
        format!(" +{} -{} ", stats.additions, stats.removals)
    };

    let block = Block::default()
        .title(format!(" Diff ({}) ", model.granularity.as_str()))
        .title_bottom(legend)
        .title_bottom(Line::from(summary).right_aligned())
        .borders(Borders::ALL);

    let max_scroll = model.max_diff_scroll_for(spans);
    let scroll = u16::try_from(model.diff_scroll.min(max_scroll)).unwrap_or(u16::MAX);
    let view = Paragraph::new(diff_lines(spans))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(view, area);
}
