//! # Merge Replay Encoder

use crate::decoders::BpeDecoder;
use crate::encoders::token_encoder::TokenEncoder;
use crate::segmentation::TextSegmentor;
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use std::sync::Arc;

/// Encode a single word against `vocab`, appending to `tokens`.
///
/// Repeatedly merges the leftmost adjacent pair whose merged token has the
/// lowest identifier. Merged identifiers are assigned in rank order, so this
/// replays the merge rules in the order they were learned.
pub fn encode_append_word<T: TokenType>(
    vocab: &Vocabulary<T>,
    word: &str,
    tokens: &mut Vec<T>,
) {
    // Reuse the output buffer as a stack.
    // Append the base tokens to the buffer.
    let start = tokens.len();
    vocab.append_base_tokens(word, tokens);

    // Incrementally shrink the "stack" (the new buffer end)
    // Until we can no longer find pairs to merge.
    let stop = start + 2;
    while tokens.len() >= stop {
        // Find the pair which merges to the lowest ranked token.
        let mut best_match: Option<(usize, T)> = None;

        for idx in start..tokens.len() - 1 {
            let pair = (tokens[idx], tokens[idx + 1]);

            if let Some(merge_token) = vocab.merge_token(&pair)
                && best_match.is_none_or(|(_, best)| merge_token < best)
            {
                best_match = Some((idx, merge_token));
            }
        }

        match best_match {
            Some((idx, merge_token)) => {
                // buf[idx..=idx+1] (a, b) -> buf[idx] t
                tokens[idx] = merge_token;
                tokens.remove(idx + 1);
            }
            // No more merges possible
            None => break,
        }
    }
}

/// Segment `text` and encode every item against `vocab`, appending to `tokens`.
pub fn encode_append_text<T: TokenType>(
    vocab: &Vocabulary<T>,
    text: &str,
    tokens: &mut Vec<T>,
) {
    let segmentor = TextSegmentor::from(vocab.mode());
    for word in segmentor.split_words(text) {
        encode_append_word(vocab, word, tokens);
    }
}

/// A merge-replaying [`TokenEncoder`].
#[derive(Debug, Clone)]
pub struct BpeEncoder<T: TokenType> {
    /// The shared vocabulary.
    pub vocab: Arc<Vocabulary<T>>,
}

impl<T: TokenType> From<Vocabulary<T>> for BpeEncoder<T> {
    fn from(vocab: Vocabulary<T>) -> Self {
        Self::new(Arc::new(vocab))
    }
}

impl<T: TokenType> BpeEncoder<T> {
    /// Construct a new encoder.
    pub fn new(vocab: Arc<Vocabulary<T>>) -> Self {
        Self { vocab }
    }

    /// Build a [`BpeDecoder`] sharing this encoder's vocabulary.
    pub fn to_decoder(&self) -> BpeDecoder<T> {
        BpeDecoder::new(self.vocab.clone())
    }
}

impl<T: TokenType> TokenEncoder<T> for BpeEncoder<T> {
    fn vocab(&self) -> &Vocabulary<T> {
        &self.vocab
    }

    fn split_text<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        TextSegmentor::from(self.vocab.mode()).split_words(text)
    }

    fn encode_append_word(
        &self,
        word: &str,
        tokens: &mut Vec<T>,
    ) {
        encode_append_word(&self.vocab, word, tokens);
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        encode_append_text(&self.vocab, text, tokens);
    }
}
