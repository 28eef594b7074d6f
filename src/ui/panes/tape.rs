//! Tape pane rendering
//!
//! Cells are laid out as a grid of left-aligned three-digit values, as many
//! per row as the pane is wide. Only the visible rows are read from the
//! tape, which keeps rendering cheap for the default 30000 cells.

use super::{emphasis_style, inner_height, pane_block, ScrollState};
use crate::memory::Tape;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of one cell including its separator
const CELL_WIDTH: usize = 4;

/// Cells that fit on one row of a pane with the given inner width
pub fn cells_per_row(inner_width: usize) -> usize {
    // The last cell on a row needs no separator
    ((inner_width + 1) / CELL_WIDTH).max(1)
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &Tape,
    cursor: usize,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let current = tape.get(cursor).unwrap_or_default();
    let block = pane_block(
        format!(" Tape [{}] = {} ", cursor, current),
        is_focused,
    );

    let per_row = cells_per_row(area.width.saturating_sub(2) as usize);
    let total_rows = tape.len().div_ceil(per_row);
    let visible_rows = inner_height(area);
    scroll.settle(cursor / per_row, total_rows, visible_rows);

    let lines: Vec<Line> = (scroll.offset..total_rows.min(scroll.offset + visible_rows))
        .map(|row| {
            let start = row * per_row;
            let cells = tape.window(start, start + per_row);
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .flat_map(|(i, &cell)| {
                    let text = format!("{:<3}", cell);
                    let style = if start + i == cursor {
                        emphasis_style()
                    } else if cell != 0 {
                        Style::default().fg(DEFAULT_THEME.number)
                    } else {
                        Style::default().fg(DEFAULT_THEME.comment)
                    };
                    let cell_span = Span::styled(text, style);
                    if i + 1 < cells.len() {
                        vec![cell_span, Span::raw(" ")]
                    } else {
                        vec![cell_span]
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_per_row() {
        assert_eq!(cells_per_row(0), 1);
        assert_eq!(cells_per_row(3), 1);
        assert_eq!(cells_per_row(7), 2);
        assert_eq!(cells_per_row(79), 20);
    }
}
