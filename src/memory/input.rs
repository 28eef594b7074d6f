//! Pre-supplied input buffer
//!
//! Each input character becomes one cell value: its code point, when that
//! fits in a cell (U+0000 to U+00FF). That is the inverse of how output
//! bytes are decoded, so echoed text comes back unchanged. A character above
//! U+00FF cannot fit in one cell and is fed as its UTF-8 bytes instead, one
//! cell per byte.
//!
//! The read cursor itself lives in the machine state; the buffer is immutable.

/// Immutable input for one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputBuffer {
    text: String,
    /// Cell values handed out by `,`, in order
    cells: Vec<u8>,
    /// For each character of `text`, the cell index just past it
    char_ends: Vec<usize>,
}

impl InputBuffer {
    pub fn new(text: &str) -> Self {
        let mut cells = Vec::with_capacity(text.len());
        let mut char_ends = Vec::with_capacity(text.len());
        for c in text.chars() {
            match u8::try_from(c) {
                Ok(byte) => cells.push(byte),
                Err(_) => {
                    let mut buf = [0; 4];
                    cells.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
            char_ends.push(cells.len());
        }

        InputBuffer {
            text: text.to_string(),
            cells,
            char_ends,
        }
    }

    /// Cell value at `cursor`, or `None` once the input is exhausted
    pub fn read(&self, cursor: usize) -> Option<u8> {
        self.cells.get(cursor).copied()
    }

    /// Number of cell values the input supplies
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The raw input text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Char position in [`text`](Self::text) of the character holding cell `cursor`.
    ///
    /// A cursor partway through a character fed as several UTF-8 bytes maps
    /// to that character. An exhausted cursor maps to the char count.
    pub fn char_offset(&self, cursor: usize) -> usize {
        self.char_ends.partition_point(|&end| end <= cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_until_exhausted() {
        let input = InputBuffer::new("ab");
        assert_eq!(input.read(0), Some(b'a'));
        assert_eq!(input.read(1), Some(b'b'));
        assert_eq!(input.read(2), None);
        assert_eq!(input.read(100), None);
    }

    #[test]
    fn test_latin1_char_is_one_cell() {
        let input = InputBuffer::new("é\u{ff}");
        assert_eq!(input.len(), 2);
        assert_eq!(input.read(0), Some(0xe9));
        assert_eq!(input.read(1), Some(0xff));
        assert_eq!(input.read(2), None);
    }

    #[test]
    fn test_wide_char_falls_back_to_utf8() {
        let input = InputBuffer::new("€a");
        assert_eq!(input.len(), 4);
        assert_eq!(input.read(0), Some(0xe2));
        assert_eq!(input.read(1), Some(0x82));
        assert_eq!(input.read(2), Some(0xac));
        assert_eq!(input.read(3), Some(b'a'));
    }

    #[test]
    fn test_char_offset_ascii() {
        let input = InputBuffer::new("abc");
        assert_eq!(input.char_offset(0), 0);
        assert_eq!(input.char_offset(2), 2);
        assert_eq!(input.char_offset(3), 3);
    }

    #[test]
    fn test_char_offset_latin1() {
        let input = InputBuffer::new("éx");
        assert_eq!(input.char_offset(0), 0);
        assert_eq!(input.char_offset(1), 1);
        assert_eq!(input.char_offset(2), 2);
    }

    #[test]
    fn test_char_offset_wide_char() {
        let input = InputBuffer::new("€x");
        assert_eq!(input.char_offset(0), 0);
        assert_eq!(input.char_offset(1), 0);
        assert_eq!(input.char_offset(2), 0);
        assert_eq!(input.char_offset(3), 1);
        assert_eq!(input.char_offset(4), 2);
    }

    #[test]
    fn test_empty() {
        let input = InputBuffer::new("");
        assert!(input.is_empty());
        assert_eq!(input.read(0), None);
        assert_eq!(input.char_offset(0), 0);
    }
}
