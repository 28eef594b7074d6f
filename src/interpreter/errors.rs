//! Runtime error types for the tape machine
//!
//! This module defines [`RuntimeError`], the errors a driver can see while
//! stepping a machine or seeking through its history. Invalid settings are a
//! separate concern, see [`crate::config::ConfigError`].
//!
//! Running out of step budget is not an error. It halts the machine like a
//! normal end of program, with [`HaltReason`] telling the two apart.
//!
//! [`HaltReason`]: crate::interpreter::engine::HaltReason

use std::fmt;
use thiserror::Error;

/// Direction of a bracket scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// `[` looking for its `]`
    Forward,
    /// `]` looking for its `[`
    Backward,
}

impl fmt::Display for ScanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanDirection::Forward => write!(f, "'[' has no matching ']'"),
            ScanDirection::Backward => write!(f, "']' has no matching '['"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A bracket scan ran off the end of the program
    #[error("Malformed program: {direction} (instruction {position})")]
    MalformedProgram {
        /// Instruction index of the unmatched bracket
        position: usize,
        direction: ScanDirection,
    },

    /// History lookup outside the recorded range
    #[error("History index {index} out of range, {count} snapshot(s) recorded")]
    HistoryOutOfRange { index: usize, count: usize },
}
