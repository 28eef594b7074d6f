//! Output pane rendering

use super::{inner_height, pane_block, visible_char, ScrollState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Split output text into display lines, control characters made visible
pub fn output_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.chars().map(visible_char).collect())
        .collect();
    // Remove trailing empty line if text ended with newline
    if lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Render the output pane, keeping the newest line in view
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output_text: &str,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let block = pane_block(
        format!(" Output ({} bytes) ", output_text.chars().count()),
        is_focused,
    );

    if output_text.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = output_lines(output_text);
    let visible_rows = inner_height(area);
    scroll.settle(lines.len() - 1, lines.len(), visible_rows);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(scroll.offset)
        .take(visible_rows)
        .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
