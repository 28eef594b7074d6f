// Execution engine for the tape machine

use crate::config::MachineConfig;
use crate::interpreter::errors::{RuntimeError, ScanDirection};
use crate::interpreter::state::MachineState;
use crate::memory::InputBuffer;
use crate::parser::{Instruction, Program};
use crate::snapshot::{History, Snapshot};
use std::fmt;
use tracing::{debug, trace, warn};

/// Why a machine stopped executing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The instruction pointer ran past the last instruction
    Finished,
    /// The step budget was used up
    StepBudgetExhausted,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::Finished => write!(f, "program finished"),
            HaltReason::StepBudgetExhausted => write!(f, "step budget exhausted"),
        }
    }
}

/// Outcome of a single [`Machine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// One instruction ran and a snapshot was recorded
    Executed,
    /// Nothing ran, the machine is stopped
    Halted(HaltReason),
}

/// The tape machine and the history of everything it has done
pub struct Machine {
    program: Program,
    input: InputBuffer,
    config: MachineConfig,

    /// Live state, mutated in place by `step`
    state: MachineState,

    /// Snapshot 0 is the state before any instruction
    history: History,

    /// Set by the first `step` that reports `Halted`
    halt_reason: Option<HaltReason>,
}

impl Machine {
    /// Build a machine from raw source and input text and record the initial snapshot
    pub fn new(source: &str, input: &str, config: MachineConfig) -> Self {
        let program = Program::parse(source);
        let input = InputBuffer::new(input);
        let state = MachineState::new(config.tape_len);
        let history = History::new(Snapshot::capture(&state));

        debug!(
            instructions = program.len(),
            input_cells = input.len(),
            tape_len = config.tape_len.get(),
            max_steps = config.max_steps,
            "machine created"
        );

        Machine {
            program,
            input,
            config,
            state,
            history,
            halt_reason: None,
        }
    }

    /// Execute exactly one instruction.
    ///
    /// Returns `Halted` without touching anything when the program has ended
    /// or the step budget is spent. An unmatched bracket is reported before
    /// any state changes, so a failed step leaves the machine as it was.
    pub fn step(&mut self) -> Result<StepResult, RuntimeError> {
        let ip = self.state.instruction_pointer;
        let Some(instruction) = self.program.get(ip) else {
            return Ok(self.halt(HaltReason::Finished));
        };
        if self.history.count() > self.config.max_steps {
            return Ok(self.halt(HaltReason::StepBudgetExhausted));
        }

        let state = &mut self.state;
        match instruction {
            Instruction::MoveRight => state.cursor = state.tape.right_of(state.cursor),
            Instruction::MoveLeft => state.cursor = state.tape.left_of(state.cursor),
            Instruction::Increment => state.tape.increment(state.cursor),
            Instruction::Decrement => state.tape.decrement(state.cursor),
            Instruction::Output => {
                let byte = state.current_cell();
                state.emit(byte);
            }
            Instruction::Input => match self.input.read(state.input_cursor) {
                Some(byte) => {
                    state.set_current_cell(byte);
                    state.input_cursor += 1;
                }
                // Exhausted input reads as zero
                None => state.set_current_cell(0),
            },
            Instruction::LoopStart => {
                if state.current_cell() == 0 {
                    state.instruction_pointer = find_matching_close(self.program.instructions(), ip)?;
                }
            }
            Instruction::LoopEnd => {
                if state.current_cell() != 0 {
                    state.instruction_pointer = find_matching_open(self.program.instructions(), ip)?;
                }
            }
        }

        // Applies after a jump too: the matched bracket is skipped, not re-run
        state.instruction_pointer += 1;
        self.history.push(Snapshot::capture(state));

        trace!(
            step = self.history.count() - 1,
            %instruction,
            ip = state.instruction_pointer,
            cursor = state.cursor,
            "executed"
        );

        Ok(StepResult::Executed)
    }

    /// Step until the machine halts
    pub fn run_to_completion(&mut self) -> Result<HaltReason, RuntimeError> {
        loop {
            if let StepResult::Halted(reason) = self.step()? {
                debug!(
                    snapshots = self.history.count(),
                    output_bytes = self.state.output.len(),
                    %reason,
                    "run complete"
                );
                return Ok(reason);
            }
        }
    }

    fn halt(&mut self, reason: HaltReason) -> StepResult {
        if self.halt_reason.is_none() {
            debug!(step = self.executed_steps(), %reason, "machine halted");
        }
        self.halt_reason = Some(reason);
        StepResult::Halted(reason)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Give up the machine, keeping its history
    pub fn into_history(self) -> History {
        self.history
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Cause of the last `Halted` result, `None` while still runnable
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt_reason
    }

    /// Number of instructions executed so far
    pub fn executed_steps(&self) -> usize {
        self.history.count() - 1
    }
}

/// Index of the `]` closing the `[` at `open`
fn find_matching_close(program: &[Instruction], open: usize) -> Result<usize, RuntimeError> {
    let mut depth = 1usize;
    let mut ip = open;

    while depth > 0 {
        ip += 1;
        match program.get(ip) {
            Some(Instruction::LoopStart) => depth += 1,
            Some(Instruction::LoopEnd) => depth -= 1,
            Some(_) => {}
            None => return Err(malformed(open, ScanDirection::Forward)),
        }
    }

    Ok(ip)
}

/// Index of the `[` opened by the `]` at `close`
fn find_matching_open(program: &[Instruction], close: usize) -> Result<usize, RuntimeError> {
    let mut depth = 1usize;
    let mut ip = close;

    while depth > 0 {
        ip = ip
            .checked_sub(1)
            .ok_or_else(|| malformed(close, ScanDirection::Backward))?;
        match program[ip] {
            Instruction::LoopEnd => depth += 1,
            Instruction::LoopStart => depth -= 1,
            _ => {}
        }
    }

    Ok(ip)
}

fn malformed(position: usize, direction: ScanDirection) -> RuntimeError {
    let error = RuntimeError::MalformedProgram {
        position,
        direction,
    };
    warn!(%error, "bracket scan failed");
    error
}
