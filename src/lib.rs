//! # Introduction
//!
//! tapescrub runs Brainfuck programs on a fixed-size byte tape, capturing a
//! snapshot of the full machine state after every instruction. The snapshot
//! history can then be scrubbed forward and backward through a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Program → Machine → History → TUI
//! ```
//!
//! 1. [`parser`]: filters source text down to the eight instructions.
//! 2. [`interpreter`]: the [`Machine`], which executes one instruction per
//!    `step` and records a [`snapshot::Snapshot`] each time.
//! 3. [`memory`]: the circular [`memory::Tape`] and the input buffer.
//! 4. [`snapshot`]: the append-only [`snapshot::History`].
//! 5. [`config`]: tape length and step budget, with validation of
//!    user-supplied text.
//! 6. [`ui`]: ratatui-based scrubber; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use tapescrub::{Machine, MachineConfig};
//!
//! let mut machine = Machine::new("++.", "", MachineConfig::default());
//! machine.run_to_completion().unwrap();
//!
//! let history = machine.history();
//! assert_eq!(history.count(), 4);
//! assert_eq!(history.latest().output_text(), "\u{2}");
//! ```

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;

pub use config::{ConfigError, MachineConfig};
pub use interpreter::engine::{HaltReason, Machine, StepResult};
pub use interpreter::errors::RuntimeError;
pub use snapshot::{History, Snapshot};
