//! Main TUI application state and logic

use crate::interpreter::engine::{HaltReason, Machine};
use crate::interpreter::errors::RuntimeError;
use crate::memory::InputBuffer;
use crate::parser::Program;
use crate::snapshot::{History, Snapshot};
use crate::ui::panes::{self, ScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between states in auto-play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(100);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tape,
    Code,
    Input,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (top to bottom, left to right)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tape => FocusedPane::Code,
            FocusedPane::Code => FocusedPane::Input,
            FocusedPane::Input => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
        }
    }
}

/// The main application state
pub struct App {
    /// Every recorded state of the run
    pub history: History,

    /// The program that produced the history
    pub program: Program,

    /// The input the program read from
    pub input: InputBuffer,

    /// How the run ended
    pub outcome: Result<HaltReason, RuntimeError>,

    /// Index of the displayed snapshot
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub tape_scroll: ScrollState,
    pub code_scroll: ScrollState,
    pub input_scroll: ScrollState,
    pub output_scroll: ScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create the app from a machine that has finished running.
    ///
    /// Starts on the final state, like the end of a run.
    pub fn new(machine: Machine, outcome: Result<HaltReason, RuntimeError>) -> Self {
        let program = machine.program().clone();
        let input = machine.input().clone();
        let history = machine.into_history();
        let position = history.count() - 1;

        let status_message = format!("Recorded {} state(s)", history.count());

        App {
            history,
            program,
            input,
            outcome,
            position,
            focused_pane: FocusedPane::Tape,
            tape_scroll: ScrollState::following(),
            code_scroll: ScrollState::following(),
            input_scroll: ScrollState::following(),
            output_scroll: ScrollState::following(),
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.seek(self.position + 1) {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// How the run ended, as shown in the status bar on the last state
    pub fn outcome_text(&self) -> String {
        match &self.outcome {
            Ok(reason) => format!(
                "Halted: {} after {} step(s)",
                reason,
                self.history.count() - 1
            ),
            Err(e) => format!("Error: {}", e),
        }
    }

    /// The snapshot being displayed
    pub fn snapshot(&self) -> &Snapshot {
        self.history
            .at(self.position)
            .unwrap_or_else(|_| self.history.latest())
    }

    /// Instruction to emphasize in the code pane.
    ///
    /// This is the instruction that produced the displayed state, i.e. the
    /// one the previous state was about to execute. State 0 shows the first
    /// instruction.
    pub fn highlighted_instruction(&self) -> Option<usize> {
        let ip = self
            .history
            .at(self.position.saturating_sub(1))
            .ok()?
            .instruction_pointer();
        (ip < self.program.len()).then_some(ip)
    }

    /// Display snapshot `index`, clamped to the history.
    ///
    /// Returns false if the position did not change.
    pub fn seek(&mut self, index: usize) -> bool {
        let index = index.min(self.history.count() - 1);
        if index == self.position {
            return false;
        }
        self.position = index;
        for scroll in [
            &mut self.tape_scroll,
            &mut self.code_scroll,
            &mut self.input_scroll,
            &mut self.output_scroll,
        ] {
            scroll.follow = true;
        }
        true
    }

    /// Move `delta` states forward (negative for backward), clamped
    pub fn seek_by(&mut self, delta: isize) -> bool {
        self.seek(self.position.saturating_add_signed(delta))
    }

    /// Roughly a tenth of the history, at least one state
    pub fn page_size(&self) -> usize {
        (self.history.count() / 10).max(1)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(35),
                Constraint::Percentage(30),
            ])
            .split(main_chunks[0]);

        // Bottom row: Input | Output
        let io_columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[2]);

        let position = self.position;
        let snapshot = self
            .history
            .at(position)
            .unwrap_or_else(|_| self.history.latest());
        let highlighted = self.highlighted_instruction();
        let outcome = self.outcome_text();

        panes::render_tape_pane(
            frame,
            rows[0],
            snapshot.tape(),
            snapshot.cursor(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        panes::render_code_pane(
            frame,
            rows[1],
            &self.program,
            highlighted,
            self.focused_pane == FocusedPane::Code,
            &mut self.code_scroll,
        );

        panes::render_input_pane(
            frame,
            io_columns[0],
            &self.input,
            snapshot.input_cursor(),
            self.focused_pane == FocusedPane::Input,
            &mut self.input_scroll,
        );

        panes::render_output_pane(
            frame,
            io_columns[1],
            &snapshot.output_text(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                position,
                total: self.history.count(),
                is_playing: self.is_playing,
                is_error: self.outcome.is_err(),
                outcome: &outcome,
            },
        );
    }

    fn focused_scroll(&mut self) -> &mut ScrollState {
        match self.focused_pane {
            FocusedPane::Tape => &mut self.tape_scroll,
            FocusedPane::Code => &mut self.code_scroll,
            FocusedPane::Input => &mut self.input_scroll,
            FocusedPane::Output => &mut self.output_scroll,
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let before = self.position;
                self.seek(before.saturating_add(n));
                self.status_message =
                    format!("Stepped forward {} step(s)", self.position - before);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.seek_by(-1) {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: at first state".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.seek_by(1) {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: at last state".to_string()
                };
            }
            KeyCode::PageUp => {
                self.is_playing = false;
                let page = self.page_size() as isize;
                self.seek_by(-page);
                self.status_message = format!("Jumped to state {}", self.position + 1);
            }
            KeyCode::PageDown => {
                self.is_playing = false;
                let page = self.page_size() as isize;
                self.seek_by(page);
                self.status_message = format!("Jumped to state {}", self.position + 1);
            }
            KeyCode::Up => self.focused_scroll().scroll_up(),
            KeyCode::Down => self.focused_scroll().scroll_down(),
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        // Replay from the start when already at the end
                        if self.position + 1 >= self.history.count() {
                            self.seek(0);
                        }
                        self.last_play_time = Instant::now();
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter | KeyCode::End => {
                self.is_playing = false;
                self.seek(self.history.count() - 1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace | KeyCode::Home => {
                self.is_playing = false;
                self.seek(0);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(source: &str) -> App {
        let mut machine = Machine::new(source, "", MachineConfig::default());
        let outcome = machine.run_to_completion();
        App::new(machine, outcome)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    /// Text of the bottom row after drawing the app
    fn status_row(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(200, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let start = buffer.content.len() - width;
        buffer.content[start..].iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_starts_at_last_state() {
        let app = app("+++");
        assert_eq!(app.position, 3);
        assert_eq!(app.snapshot().current_cell(), 3);
        assert_eq!(app.outcome_text(), "Halted: program finished after 3 step(s)");
    }

    #[test]
    fn test_arrow_keys_step() {
        let mut app = app("+++");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.position, 2);
        assert_eq!(app.snapshot().current_cell(), 2);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.position, 3);
        assert!(app.status_message.starts_with("Cannot step forward"));
    }

    #[test]
    fn test_start_end_and_digits() {
        let mut app = app("++++++++++");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.position, 0);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.position, 3);
        press(&mut app, KeyCode::End);
        assert_eq!(app.position, 10);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.position, 10);
        assert_eq!(app.status_message, "Stepped forward 0 step(s)");
    }

    #[test]
    fn test_page_jump() {
        let mut app = app(&"+".repeat(99));
        assert_eq!(app.page_size(), 10);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.position, 89);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.position, 0);
    }

    #[test]
    fn test_highlight_follows_previous_state() {
        let mut app = app("a+b>");
        app.seek(0);
        assert_eq!(app.highlighted_instruction(), Some(0));
        app.seek(1);
        assert_eq!(app.highlighted_instruction(), Some(0));
        app.seek(2);
        assert_eq!(app.highlighted_instruction(), Some(1));
    }

    #[test]
    fn test_empty_program_has_no_highlight() {
        let app = app("");
        assert_eq!(app.position, 0);
        assert_eq!(app.highlighted_instruction(), None);
    }

    #[test]
    fn test_error_outcome_keeps_partial_history() {
        let app = app("+]");
        assert!(app.outcome.is_err());
        assert_eq!(app.history.count(), 2);
        assert!(app.outcome_text().starts_with("Error: Malformed program"));
    }

    #[test]
    fn test_halt_reason_shown_after_navigating_back_to_end() {
        let mut app = app("+++");
        press(&mut app, KeyCode::Left);
        assert!(!status_row(&mut app).contains("Halted"));

        press(&mut app, KeyCode::End);
        assert_eq!(app.status_message, "Jumped to end");
        let row = status_row(&mut app);
        assert!(row.contains("Halted: program finished after 3 step(s)"));
        assert!(row.contains("Jumped to end"));
    }

    #[test]
    fn test_error_shown_on_last_state() {
        let mut app = app("+]");
        press(&mut app, KeyCode::Home);
        assert!(!status_row(&mut app).contains("Error"));
        press(&mut app, KeyCode::Enter);
        assert!(status_row(&mut app).contains("Error: Malformed program"));
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app("+");
        for expected in [
            FocusedPane::Code,
            FocusedPane::Input,
            FocusedPane::Output,
            FocusedPane::Tape,
        ] {
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.focused_pane, expected);
        }
    }

    #[test]
    fn test_quit() {
        let mut app = app("+");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
