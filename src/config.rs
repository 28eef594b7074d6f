//! Machine configuration and validation of user-supplied settings
//!
//! [`MachineConfig`] is what the machine is built from. Its tape length is a
//! [`NonZeroUsize`], so an invalid configuration cannot reach the machine.
//! Text coming from a user goes through [`MachineConfig::parse`] first.

use crate::interpreter::constants::{DEFAULT_MAX_STEPS, DEFAULT_TAPE_LEN};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Rejected configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of tape cells
    pub tape_len: NonZeroUsize,
    /// Maximum number of executed instructions
    pub max_steps: usize,
}

impl MachineConfig {
    pub fn new(tape_len: NonZeroUsize, max_steps: usize) -> Self {
        MachineConfig {
            tape_len,
            max_steps,
        }
    }

    /// Validate both settings from text, as typed by a user
    pub fn parse(tape_len: &str, max_steps: &str) -> Result<Self, ConfigError> {
        let tape_len = parse_positive("tape length", tape_len)?;
        let max_steps = parse_positive("max steps", max_steps)?;
        Ok(MachineConfig::new(tape_len, max_steps.get()))
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            tape_len: DEFAULT_TAPE_LEN,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Parse a strictly positive integer setting
pub fn parse_positive(field: &'static str, text: &str) -> Result<NonZeroUsize, ConfigError> {
    let text = text.trim();
    // Accept negative numbers here so they are reported as non-positive
    let value: i128 = text.parse().map_err(|_| ConfigError::NotAnInteger {
        field,
        value: text.to_string(),
    })?;

    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ConfigError::NotPositive {
            field,
            value: text.to_string(),
        })
}
