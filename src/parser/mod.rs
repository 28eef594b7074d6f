//! Program text handling
//!
//! - [`program`]: the eight-symbol [`Instruction`] set and the filtered
//!   [`Program`] with its raw-source offset table
//!
//! There is no grammar to speak of: any character outside the alphabet is
//! discarded. Bracket balance is not checked here; an unmatched bracket is
//! only reported when execution actually needs to jump over it.
//!
//! [`Instruction`]: program::Instruction
//! [`Program`]: program::Program

pub mod program;

pub use program::{Instruction, Program};
