// Mutable machine state, transformed in place by each step

use crate::memory::Tape;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Everything that changes while a program runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub tape: Tape,
    /// Selected tape cell, always `< tape.len()`
    pub cursor: usize,
    /// Next instruction to execute, `== program.len()` once halted
    pub instruction_pointer: usize,
    /// Bytes written by `.`, shared with snapshots until the next write
    pub output: Arc<Vec<u8>>,
    /// Next input byte to read, never decreases
    pub input_cursor: usize,
}

impl MachineState {
    pub fn new(tape_len: NonZeroUsize) -> Self {
        MachineState {
            tape: Tape::new(tape_len),
            cursor: 0,
            instruction_pointer: 0,
            output: Arc::new(Vec::new()),
            input_cursor: 0,
        }
    }

    pub fn current_cell(&self) -> u8 {
        self.tape.get(self.cursor).unwrap_or_default()
    }

    pub fn set_current_cell(&mut self, value: u8) {
        self.tape.set(self.cursor, value);
    }

    pub fn emit(&mut self, byte: u8) {
        Arc::make_mut(&mut self.output).push(byte);
    }
}
