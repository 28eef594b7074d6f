//! Memory model for the tape machine
//!
//! - [`tape`]: fixed-length circular byte tape, shared copy-on-write between
//!   snapshots
//! - [`input`]: the immutable input buffer read by `,`
//!
//! # Wraparound
//!
//! Cell arithmetic wraps modulo 256 and cursor movement wraps modulo the
//! tape length in both directions:
//! ```text
//! 255 + 1 → 0        0 - 1 → 255
//! cursor len-1 > → 0  cursor 0 < → len-1
//! ```

pub mod input;
pub mod tape;

pub use input::InputBuffer;
pub use tape::Tape;
