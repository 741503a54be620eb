//! # Token Encoder Trait

use crate::types::TokenType;
use crate::vocab::{SpecialToken, Vocabulary};

/// Wrap the tokens appended by `append` in the begin / end tokens of `vocab`.
pub fn encode_delimited<T, F>(
    vocab: &Vocabulary<T>,
    capacity: usize,
    append: F,
) -> Vec<T>
where
    T: TokenType,
    F: FnOnce(&mut Vec<T>),
{
    let mut tokens = Vec::with_capacity(capacity);
    tokens.push(vocab.special(SpecialToken::Begin));
    append(&mut tokens);
    tokens.push(vocab.special(SpecialToken::End));
    tokens
}

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// The vocabulary this encoder maps into.
    fn vocab(&self) -> &Vocabulary<T>;

    /// Split text into the items merges are confined to.
    fn split_text<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str>;

    /// Encode a word, and append the resulting tokens to the given token buffer.
    fn encode_append_word(
        &self,
        word: &str,
        tokens: &mut Vec<T>,
    );

    /// Encode text into tokens, without the sequence delimiters.
    ///
    /// Append to the `tokens` buffer.
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        for word in self.split_text(text) {
            self.encode_append_word(word, tokens);
        }
    }

    /// Encode text into tokens, wrapped in the begin / end tokens.
    fn encode<S: AsRef<str>>(
        &self,
        text: S,
    ) -> Vec<T> {
        let text = text.as_ref();
        encode_delimited(self.vocab(), text.len() + 2, |tokens| {
            self.encode_append(text, tokens)
        })
    }

    /// Encode a batch of text into tokens.
    fn encode_batch(
        &self,
        batch: &[String],
    ) -> Vec<Vec<T>> {
        batch.iter().map(|s| self.encode(s)).collect()
    }
}
