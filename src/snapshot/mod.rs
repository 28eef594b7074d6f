// Snapshot history for time-travel stepping

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::state::MachineState;
use crate::memory::Tape;

/// Immutable copy of the machine state at one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: MachineState,
}

impl Snapshot {
    pub(crate) fn capture(state: &MachineState) -> Self {
        Snapshot {
            state: state.clone(),
        }
    }

    pub fn tape(&self) -> &Tape {
        &self.state.tape
    }

    /// All cell values, in tape order
    pub fn cells(&self) -> Vec<u8> {
        self.state.tape.to_vec()
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn current_cell(&self) -> u8 {
        self.state.current_cell()
    }

    pub fn instruction_pointer(&self) -> usize {
        self.state.instruction_pointer
    }

    pub fn output(&self) -> &[u8] {
        &self.state.output
    }

    /// Output decoded one character per byte (code point = byte value)
    pub fn output_text(&self) -> String {
        self.state.output.iter().map(|&b| char::from(b)).collect()
    }

    pub fn input_cursor(&self) -> usize {
        self.state.input_cursor
    }
}

/// Append-only execution history of one run
///
/// Never empty: the machine records the initial state on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub(crate) fn new(initial: Snapshot) -> Self {
        History {
            snapshots: vec![initial],
        }
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Number of snapshots recorded so far
    pub fn count(&self) -> usize {
        self.snapshots.len()
    }

    /// Get a snapshot by index
    pub fn at(&self, index: usize) -> Result<&Snapshot, RuntimeError> {
        self.snapshots
            .get(index)
            .ok_or(RuntimeError::HistoryOutOfRange {
                index,
                count: self.snapshots.len(),
            })
    }

    /// The most recent snapshot
    pub fn latest(&self) -> &Snapshot {
        // The initial snapshot is never removed
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn state() -> MachineState {
        MachineState::new(NonZeroUsize::new(8).unwrap())
    }

    #[test]
    fn test_new_history_has_initial_snapshot() {
        let history = History::new(Snapshot::capture(&state()));
        assert_eq!(history.count(), 1);
        assert_eq!(history.latest(), history.at(0).unwrap());
    }

    #[test]
    fn test_at_out_of_range() {
        let history = History::new(Snapshot::capture(&state()));
        assert_eq!(
            history.at(1),
            Err(RuntimeError::HistoryOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn test_snapshot_unaffected_by_later_writes() {
        let mut s = state();
        s.set_current_cell(3);
        s.emit(b'a');
        let snapshot = Snapshot::capture(&s);

        s.set_current_cell(4);
        s.emit(b'b');
        s.cursor = 5;

        assert_eq!(snapshot.current_cell(), 3);
        assert_eq!(snapshot.cursor(), 0);
        assert_eq!(snapshot.output(), b"a");
    }

    #[test]
    fn test_output_text_maps_bytes_to_code_points() {
        let mut s = state();
        s.emit(0);
        s.emit(b'H');
        s.emit(0xE9);
        let snapshot = Snapshot::capture(&s);
        assert_eq!(snapshot.output_text(), "\u{0}H\u{e9}");
    }
}
