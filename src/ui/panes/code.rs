//! Code pane rendering
//!
//! Shows the program exactly as written, comments included. Instruction
//! characters are colored by kind and the highlighted instruction is found
//! through the program's raw-source offset table, since the instruction
//! pointer indexes the filtered program.

use super::{char_position, emphasis_style, inner_height, pane_block, visible_char, ScrollState};
use crate::parser::{Instruction, Program};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn instruction_style(c: char) -> Style {
    match Instruction::from_char(c) {
        Some(Instruction::MoveLeft | Instruction::MoveRight) => {
            Style::default().fg(DEFAULT_THEME.keyword)
        }
        Some(Instruction::Increment | Instruction::Decrement) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        Some(Instruction::Output | Instruction::Input) => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        Some(Instruction::LoopStart | Instruction::LoopEnd) => Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.comment), // Everything else is a comment
    }
}

/// Style one source line, emphasizing `highlight_column` if given
fn highlight_code_line(line: &str, highlight_column: Option<usize>) -> Line<'static> {
    let spans: Vec<Span> = line
        .chars()
        .enumerate()
        .map(|(column, c)| {
            let style = if Some(column) == highlight_column {
                emphasis_style()
            } else {
                instruction_style(c)
            };
            Span::styled(visible_char(c).to_string(), style)
        })
        .collect();
    Line::from(spans)
}

/// Render the code pane.
///
/// `instruction` is the index into the filtered program to emphasize, or
/// `None` when there is nothing to point at (empty or finished program).
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    instruction: Option<usize>,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let title = match instruction.and_then(|ip| program.get(ip).map(|i| (ip, i))) {
        Some((ip, i)) => format!(" Code [{}/{}] {} ", ip, program.len(), i),
        None => format!(" Code ({} instructions) ", program.len()),
    };
    let block = pane_block(title, is_focused);

    let source = program.source();
    let highlight = instruction
        .and_then(|ip| program.source_offset(ip))
        .map(|offset| char_position(source, offset));

    let lines: Vec<&str> = source.split('\n').collect();
    let visible_rows = inner_height(area);
    scroll.settle(
        highlight.map(|(line, _)| line).unwrap_or(0),
        lines.len(),
        visible_rows,
    );

    let visible: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll.offset)
        .take(visible_rows)
        .map(|(idx, line)| {
            let column = highlight
                .filter(|(line_idx, _)| *line_idx == idx)
                .map(|(_, column)| column);
            highlight_code_line(line, column)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_marks_one_char() {
        let line = highlight_code_line("a+[", Some(1));
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].style, emphasis_style());
        assert_ne!(line.spans[0].style, emphasis_style());
        assert_eq!(line.spans[2].content, "[");
    }

    #[test]
    fn test_comments_use_comment_color() {
        assert_eq!(instruction_style('x').fg, Some(DEFAULT_THEME.comment));
        assert_eq!(instruction_style('+').fg, Some(DEFAULT_THEME.number));
    }
}
