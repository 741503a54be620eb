//! # Vocabulary Decoder

use crate::decoders::decode_context::DecodeContext;
use crate::decoders::token_decoder::TokenDecoder;
use crate::errors::DecodeError;
use crate::types::{AlphabetMode, TokenType};
use crate::vocab::{SpecialToken, Symbol, Vocabulary};
use std::sync::Arc;

/// Expand the tokens on `ctx.stack` into `ctx.buf`.
///
/// * pad / begin / end are dropped.
/// * unknown renders as `<unk>` in character mode, and is dropped in byte mode.
/// * the end-of-word marker renders as a single space.
///
/// On error, the offending token is left on top of `ctx.stack`.
pub fn decode_append<T: TokenType>(
    vocab: &Vocabulary<T>,
    ctx: &mut DecodeContext<T>,
) -> Result<(), DecodeError<T>> {
    let mode = vocab.mode();

    while let Some(t) = ctx.stack.pop() {
        match vocab.symbol(t) {
            None => {
                ctx.stack.push(t);
                return Err(DecodeError::IdentifierOutOfRange(t));
            }
            Some(Symbol::Special(SpecialToken::Unknown)) => {
                if mode == AlphabetMode::Character {
                    ctx.buf
                        .extend_from_slice(SpecialToken::Unknown.literal().as_bytes());
                }
            }
            Some(Symbol::Special(_)) => {}
            Some(Symbol::Char(c)) => {
                let mut tmp = [0_u8; 4];
                ctx.buf
                    .extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            }
            Some(Symbol::EndOfWord) => ctx.buf.push(b' '),
            Some(Symbol::Byte(b)) => ctx.buf.push(*b),
            Some(Symbol::Merged((a, b))) => {
                ctx.stack.push(*b);
                ctx.stack.push(*a);
            }
        }
    }
    Ok(())
}

/// Turn decoded bytes into text.
///
/// In character mode, word boundaries collapse to single spaces and the
/// result is trimmed; byte mode text is returned as-is.
pub fn finish_text<T: TokenType>(
    mode: AlphabetMode,
    buf: Vec<u8>,
) -> Result<String, DecodeError<T>> {
    let text = String::from_utf8(buf)?;
    Ok(match mode {
        AlphabetMode::Character => text
            .split(' ')
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        AlphabetMode::Byte => text,
    })
}

/// A [`TokenDecoder<T>`] over a shared [`Vocabulary<T>`].
#[derive(Debug, Clone)]
pub struct BpeDecoder<T: TokenType> {
    /// The shared vocabulary.
    pub vocab: Arc<Vocabulary<T>>,
}

impl<T: TokenType> From<Vocabulary<T>> for BpeDecoder<T> {
    fn from(vocab: Vocabulary<T>) -> Self {
        Self::new(Arc::new(vocab))
    }
}

impl<T: TokenType> BpeDecoder<T> {
    /// Creates a new Decoder.
    pub fn new(vocab: Arc<Vocabulary<T>>) -> Self {
        Self { vocab }
    }
}

impl<T: TokenType> TokenDecoder<T> for BpeDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ctx)))]
    fn decode_context(
        &self,
        ctx: &mut DecodeContext<T>,
    ) -> Result<(), DecodeError<T>> {
        decode_append(&self.vocab, ctx)
    }

    fn try_decode_to_string<S: AsRef<[T]>>(
        &self,
        tokens: S,
    ) -> Result<String, DecodeError<T>> {
        finish_text(self.vocab.mode(), self.try_decode_to_bytes(tokens)?)
    }
}
