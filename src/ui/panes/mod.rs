//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tape`]: tape cells as a grid with the cursor cell emphasized
//! - [`code`]: raw program source with the current instruction emphasized
//! - [`input`]: input text with the next read position emphasized
//! - [`output`]: output text produced so far
//! - [`status`]: status bar with keybindings and execution state
//!
//! Every pane takes the snapshot data it shows plus a [`ScrollState`]; none
//! of them hold state of their own.

pub mod code;
pub mod input;
pub mod output;
pub mod status;
pub mod tape;

pub use code::render_code_pane;
pub use input::render_input_pane;
pub use output::render_output_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tape::render_tape_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Vertical scroll position of a pane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// First visible row
    pub offset: usize,
    /// Bring the emphasized row into view on the next render
    pub follow: bool,
}

impl ScrollState {
    pub fn following() -> Self {
        ScrollState {
            offset: 0,
            follow: true,
        }
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.follow = false;
    }

    pub fn scroll_down(&mut self) {
        self.offset = self.offset.saturating_add(1);
        self.follow = false;
    }

    /// Clamp to the content and, if following, scroll `row` into view
    pub fn settle(&mut self, row: usize, total_rows: usize, visible_rows: usize) {
        if self.follow {
            if row < self.offset {
                self.offset = row;
            } else if row >= self.offset + visible_rows {
                self.offset = row + 1 - visible_rows;
            }
            self.follow = false;
        }
        self.offset = self.offset.min(total_rows.saturating_sub(visible_rows));
    }
}

/// Bordered block with the focus highlight used by every pane
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, min 1
pub(crate) fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Style for the emphasized cell, instruction or input character
pub(crate) fn emphasis_style() -> Style {
    Style::default()
        .bg(DEFAULT_THEME.emphasis_bg)
        .fg(ratatui::style::Color::Black)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Printable stand-in for a character, so control bytes don't garble the terminal
pub(crate) fn visible_char(c: char) -> char {
    match c {
        '\t' | '\r' => ' ',
        '\u{0}'..='\u{1f}' => char::from_u32(0x2400 + c as u32).unwrap_or('·'),
        '\u{7f}' => '␡',
        c if c.is_control() => '·',
        c => c,
    }
}

/// Line and column (both in chars) of char `offset` within `text`.
///
/// An offset at or past the end maps just after the last character.
pub(crate) fn char_position(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for c in text.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}
