//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`Machine`](engine::Machine) with its single-step transition
//! - [`state`]: the mutable [`MachineState`](state::MachineState)
//! - [`errors`]: runtime error types
//! - [`constants`]: default tape length and step budget
//!
//! # Execution Model
//!
//! Each call to `step` executes exactly one instruction, including loop
//! brackets that do not jump, and then records a snapshot. Brackets are
//! matched by scanning the program at the moment a jump is taken; there is
//! no jump table, so a step depends only on the program and the current
//! state.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod state;
