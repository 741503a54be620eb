//! # Symbols

use crate::types::{Pair, TokenType};
use serde::{Deserialize, Serialize};

/// Literal form of the end-of-word marker.
pub const END_OF_WORD_LITERAL: &str = "</w>";

/// The fixed special tokens, in identifier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialToken {
    /// Padding; identifier 0.
    Pad,

    /// Unknown symbol; identifier 1.
    Unknown,

    /// Begin of sequence; identifier 2.
    Begin,

    /// End of sequence; identifier 3.
    End,
}

impl SpecialToken {
    /// All special tokens, in identifier order.
    pub const ALL: [SpecialToken; 4] = [
        SpecialToken::Pad,
        SpecialToken::Unknown,
        SpecialToken::Begin,
        SpecialToken::End,
    ];

    /// The fixed identifier index of this special token.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The literal form of this special token.
    pub fn literal(self) -> &'static str {
        match self {
            SpecialToken::Pad => "<pad>",
            SpecialToken::Unknown => "<unk>",
            SpecialToken::Begin => "<bos>",
            SpecialToken::End => "<eos>",
        }
    }
}

/// A vocabulary symbol.
///
/// Merged symbols refer to the identifiers of their halves,
/// so the vocabulary doubles as the interning arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(serialize = "T: TokenType", deserialize = "T: TokenType"))]
pub enum Symbol<T: TokenType> {
    /// A fixed special token.
    Special(SpecialToken),

    /// A single Unicode character.
    Char(char),

    /// The end-of-word marker.
    EndOfWord,

    /// A single byte value.
    Byte(u8),

    /// The concatenation of two earlier symbols.
    Merged(Pair<T>),
}

impl<T: TokenType> Symbol<T> {
    /// Is this a base alphabet symbol?
    pub fn is_base(&self) -> bool {
        matches!(self, Symbol::Char(_) | Symbol::EndOfWord | Symbol::Byte(_))
    }

    /// Is this a merged symbol?
    pub fn is_merged(&self) -> bool {
        matches!(self, Symbol::Merged(_))
    }
}
