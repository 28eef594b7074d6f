//! Fixed-length byte tape with copy-on-write chunks
//!
//! The tape is split into [`CHUNK_LEN`]-byte chunks held behind [`Arc`].
//! Cloning a tape copies only the chunk table, and a write clones the one
//! chunk it touches if another tape still holds it. Every clone therefore
//! behaves as an independent value while unchanged chunks stay shared
//! between snapshots.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Number of cells per shared chunk
pub const CHUNK_LEN: usize = 256;

type Chunk = [u8; CHUNK_LEN];

#[derive(Clone, PartialEq, Eq)]
pub struct Tape {
    chunks: Vec<Arc<Chunk>>,
    len: usize,
}

impl Tape {
    /// Create a zeroed tape of `len` cells
    pub fn new(len: NonZeroUsize) -> Self {
        let len = len.get();
        let zero = Arc::new([0u8; CHUNK_LEN]);
        Tape {
            chunks: vec![zero; len.div_ceil(CHUNK_LEN)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, a tape has at least one cell
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.chunks[index / CHUNK_LEN][index % CHUNK_LEN])
        } else {
            None
        }
    }

    /// Write a cell.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, value: u8) {
        assert!(
            index < self.len,
            "tape index {} out of bounds for length {}",
            index,
            self.len
        );
        Arc::make_mut(&mut self.chunks[index / CHUNK_LEN])[index % CHUNK_LEN] = value;
    }

    /// Add one to a cell, wrapping 255 to 0
    pub fn increment(&mut self, index: usize) {
        let value = self.get(index).unwrap_or_default();
        self.set(index, value.wrapping_add(1));
    }

    /// Subtract one from a cell, wrapping 0 to 255
    pub fn decrement(&mut self, index: usize) {
        let value = self.get(index).unwrap_or_default();
        self.set(index, value.wrapping_sub(1));
    }

    /// Cursor position one cell to the right, wrapping at the end
    pub fn right_of(&self, cursor: usize) -> usize {
        (cursor + 1) % self.len
    }

    /// Cursor position one cell to the left, wrapping at zero
    pub fn left_of(&self, cursor: usize) -> usize {
        (cursor + self.len - 1) % self.len
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.iter().copied())
            .take(self.len)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Cells in `start..end`, clamped to the tape length
    pub fn window(&self, start: usize, end: usize) -> Vec<u8> {
        let end = end.min(self.len);
        (start.min(end)..end).filter_map(|i| self.get(i)).collect()
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonzero = self.iter().filter(|&cell| cell != 0).count();
        f.debug_struct("Tape")
            .field("len", &self.len)
            .field("nonzero_cells", &nonzero)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(len: usize) -> Tape {
        Tape::new(NonZeroUsize::new(len).unwrap())
    }

    #[test]
    fn test_new_is_zeroed() {
        let t = tape(1000);
        assert_eq!(t.len(), 1000);
        assert!(t.iter().all(|cell| cell == 0));
        assert_eq!(t.to_vec().len(), 1000);
        assert_eq!(t.get(1000), None);
    }

    #[test]
    fn test_cell_wraparound() {
        let mut t = tape(3);
        t.decrement(0);
        assert_eq!(t.get(0), Some(255));
        t.increment(0);
        assert_eq!(t.get(0), Some(0));
    }

    #[test]
    fn test_cursor_wraparound() {
        let t = tape(5);
        assert_eq!(t.left_of(0), 4);
        assert_eq!(t.right_of(4), 0);
        assert_eq!(t.right_of(2), 3);

        let single = tape(1);
        assert_eq!(single.left_of(0), 0);
        assert_eq!(single.right_of(0), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = tape(600);
        a.set(300, 7);
        let b = a.clone();
        a.set(300, 9);
        a.set(599, 1);
        assert_eq!(b.get(300), Some(7));
        assert_eq!(b.get(599), Some(0));
        assert_eq!(a.get(300), Some(9));
    }

    #[test]
    fn test_equality_is_by_value() {
        let mut a = tape(10);
        let mut b = tape(10);
        a.set(3, 4);
        b.increment(3);
        b.set(3, 4);
        assert_eq!(a, b);
        b.set(9, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_window_clamps() {
        let mut t = tape(4);
        t.set(3, 42);
        assert_eq!(t.window(2, 10), vec![0, 42]);
        assert_eq!(t.window(8, 10), Vec::<u8>::new());
    }

    #[test]
    #[should_panic]
    fn test_set_out_of_bounds_panics() {
        let mut t = tape(2);
        t.set(2, 1);
    }
}
