// Constants for the tape machine

use std::num::NonZeroUsize;

/// Default number of tape cells
pub const DEFAULT_TAPE_LEN: NonZeroUsize = match NonZeroUsize::new(30_000) {
    Some(len) => len,
    None => panic!("default tape length must be non-zero"),
};

/// Default step budget
/// Bounds the number of executed instructions, so non-terminating programs still halt
pub const DEFAULT_MAX_STEPS: usize = 100_000;
