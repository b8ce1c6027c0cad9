use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::style;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  Tab                 Switch pane"));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  Ctrl-o              Copy original into modified"));
    all_lines.push(Line::raw("  Ctrl-s              Save focused pane"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Diff", section_style));
    all_lines.push(Line::raw("  Ctrl-t / F2         Toggle edit / diff"));
    all_lines.push(Line::raw("  j/k or Up/Down      Scroll"));
    all_lines.push(Line::raw("  Space / b           Page down / up"));
    all_lines.push(Line::raw("  g / G               Top / bottom"));
    all_lines.push(Line::raw("  Ctrl-g              Cycle word / line / char"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Output", section_style));
    all_lines.push(Line::raw("  Ctrl-r              AI rewrite of the original"));
    all_lines.push(Line::raw("  Ctrl-y / c          Copy diff as rich text"));
    all_lines.push(Line::raw("  Ctrl-p              Export HTML page"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-w              Toggle watch"));
    all_lines.push(Line::raw("  Esc                 Dismiss error"));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    all_lines.truncate(usize::from(content_height));
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(all_lines), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", style::dim_style());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
