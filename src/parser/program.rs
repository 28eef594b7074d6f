//! Instruction set and program filtering
//!
//! Raw source text is reduced to the eight-symbol alphabet. Every other
//! character is a comment. The original text is kept alongside the filtered
//! instructions so a front end can map an instruction index back to the
//! character it came from.

use std::fmt;

/// A single instruction of the tape language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Decode a source character, `None` for anything outside the alphabet
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Instruction::MoveRight),
            '<' => Some(Instruction::MoveLeft),
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '.' => Some(Instruction::Output),
            ',' => Some(Instruction::Input),
            '[' => Some(Instruction::LoopStart),
            ']' => Some(Instruction::LoopEnd),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A filtered, immutable program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    source: String,
    instructions: Vec<Instruction>,
    /// Char offset in `source` of each instruction
    offsets: Vec<usize>,
}

impl Program {
    /// Build a program from raw source text, dropping every non-instruction character
    pub fn parse(source: &str) -> Self {
        let mut instructions = Vec::new();
        let mut offsets = Vec::new();

        for (offset, c) in source.chars().enumerate() {
            if let Some(instruction) = Instruction::from_char(c) {
                instructions.push(instruction);
                offsets.push(offset);
            }
        }

        Program {
            source: source.to_string(),
            instructions,
            offsets,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.instructions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The raw text the program was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The filtered instruction text
    pub fn text(&self) -> String {
        self.instructions.iter().map(|i| i.as_char()).collect()
    }

    /// Char offset in the raw source of instruction `index`.
    ///
    /// Returns `None` for the halted position (`index == len()`) and beyond.
    pub fn source_offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }
}
