//! # Error Types

use crate::types::TokenType;
use std::string::FromUtf8Error;

/// Errors raised while training a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    /// The vocabulary grew past the range of the identifier type.
    #[error("vocabulary size {size} exceeds the identifier type range")]
    TokenSpaceExhausted {
        /// The size the vocabulary would have needed.
        size: usize,
    },
}

/// Errors raised while decoding identifiers.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError<T: TokenType> {
    /// The identifier has no vocabulary entry.
    #[error("identifier out of range: {0:?}")]
    IdentifierOutOfRange(T),

    /// The reassembled bytes are not valid UTF-8.
    #[error("invalid byte sequence in decoded output: {0}")]
    InvalidByteSequence(#[from] FromUtf8Error),
}

/// Errors raised when a vocabulary fails validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    /// A special token is missing or not at its fixed identifier.
    #[error("expected special token {expected:?} at identifier {index}")]
    MisplacedSpecial {
        /// The identifier that was inspected.
        index: usize,
        /// The literal form of the expected special token.
        expected: &'static str,
    },

    /// A symbol occurs more than once.
    #[error("duplicate symbol at identifier {index}")]
    DuplicateSymbol {
        /// The identifier of the repeated symbol.
        index: usize,
    },

    /// A base symbol does not belong to the vocabulary's alphabet.
    #[error("symbol at identifier {index} does not belong to the alphabet")]
    ForeignSymbol {
        /// The identifier of the offending symbol.
        index: usize,
    },

    /// A base symbol appears after the first merged symbol.
    #[error("base symbol at identifier {index} follows a merged symbol")]
    BaseAfterMerge {
        /// The identifier of the offending symbol.
        index: usize,
    },

    /// A merged symbol refers to itself or a later identifier.
    #[error("merged symbol at identifier {index} refers to an undefined identifier")]
    ForwardReference {
        /// The identifier of the offending symbol.
        index: usize,
    },

    /// The identifier type cannot represent the vocabulary.
    #[error("vocabulary size {size} exceeds the identifier type range")]
    TokenSpaceExhausted {
        /// The number of symbols in the vocabulary.
        size: usize,
    },
}
