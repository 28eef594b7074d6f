//! Input pane rendering

use super::{char_position, emphasis_style, inner_height, pane_block, visible_char, ScrollState};
use crate::memory::InputBuffer;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the input pane with the next unread character emphasized.
///
/// Once the input is exhausted an emphasized blank marks the end, where
/// further reads yield zero.
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    input: &InputBuffer,
    input_cursor: usize,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let block = pane_block(
        format!(" Input [{}/{}] ", input_cursor.min(input.len()), input.len()),
        is_focused,
    );

    let text = input.text();
    let (cursor_line, cursor_column) = char_position(text, input.char_offset(input_cursor));
    let lines: Vec<&str> = text.split('\n').collect();
    let visible_rows = inner_height(area);
    scroll.settle(cursor_line, lines.len(), visible_rows);

    let visible: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll.offset)
        .take(visible_rows)
        .map(|(idx, line)| {
            let mut spans: Vec<Span> = line
                .chars()
                .enumerate()
                .map(|(column, c)| {
                    let style = if idx == cursor_line && column == cursor_column {
                        emphasis_style()
                    } else {
                        Style::default().fg(DEFAULT_THEME.fg)
                    };
                    Span::styled(visible_char(c).to_string(), style)
                })
                .collect();
            if idx == cursor_line && cursor_column >= line.chars().count() {
                spans.push(Span::styled(" ", emphasis_style()));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
