//! # Merge Tokenizer
//!
//! Character- and byte-level byte pair encoding.
//!
//! * [`train`] learns an ordered list of pair merges over a corpus,
//!   and returns the [`vocab::Vocabulary`] holding them.
//! * [`encode`] replays the merges over new text.
//! * [`decode`] maps identifiers back to text.
//!
//! Identifiers `0..=3` are always `<pad>`, `<unk>`, `<bos>`, `<eos>`.
//!
//! ```
//! use mergetok::types::AlphabetMode;
//!
//! let vocab = mergetok::train::<u32, _>(["low lower lowest"], 10, AlphabetMode::Byte).unwrap();
//! let ids = mergetok::encode("slower", &vocab);
//! assert_eq!(mergetok::decode(&ids, &vocab).unwrap(), "slower");
//! ```
#![warn(missing_docs, unused)]

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod segmentation;
pub mod training;
pub mod types;
pub mod vocab;

use crate::decoders::{DecodeContext, decode_append, finish_text};
use crate::encoders::{encode_append_text, encode_delimited};
use crate::errors::{DecodeError, TrainError};
use crate::training::{BpeTrainerOptions, TrainResults};
use crate::types::{AlphabetMode, TokenType};
use crate::vocab::Vocabulary;

/// Train a [`Vocabulary`] over `corpus`.
///
/// # Arguments
/// * `corpus` - the training samples.
/// * `max_merges` - the maximum number of merges to learn.
/// * `mode` - the initial alphabet.
pub fn train<T, I>(
    corpus: I,
    max_merges: usize,
    mode: AlphabetMode,
) -> Result<Vocabulary<T>, TrainError>
where
    T: TokenType,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let TrainResults { vocab, .. } =
        BpeTrainerOptions::new(mode, max_merges).train_from_samples(corpus)?;
    Ok(vocab)
}

/// Encode `text`, wrapped in the begin / end tokens.
pub fn encode<T: TokenType>(
    text: &str,
    vocab: &Vocabulary<T>,
) -> Vec<T> {
    encode_delimited(vocab, text.len() + 2, |tokens| {
        encode_append_text(vocab, text, tokens)
    })
}

/// Decode `ids` back to text.
pub fn decode<T: TokenType>(
    ids: &[T],
    vocab: &Vocabulary<T>,
) -> Result<String, DecodeError<T>> {
    let mut ctx = DecodeContext::for_tokens(ids.to_vec(), 2);
    decode_append(vocab, &mut ctx)?;
    finish_text(vocab.mode(), ctx.buf)
}
