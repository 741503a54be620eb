//! # Alphabet Initialization
//!
//! Interns the base alphabet and builds the initial training words.

use crate::errors::TrainError;
use crate::training::word::Word;
use crate::types::{AlphabetMode, CountType, StringChunkType, TokenType};
use crate::vocab::Vocabulary;

/// Builds the base [`Vocabulary`] and initial [`Word`]s from counted words.
#[derive(Debug)]
pub struct AlphabetBuilder<T: TokenType> {
    vocab: Vocabulary<T>,
    tokens: Vec<T>,
}

impl<T: TokenType> AlphabetBuilder<T> {
    /// Create a builder holding only the special tokens (and, in byte mode, the byte range).
    pub fn new(mode: AlphabetMode) -> Result<Self, TrainError> {
        Ok(Self {
            vocab: Vocabulary::new(mode)?,
            tokens: Vec::new(),
        })
    }

    /// Intern the base symbols of `word` and return its initial symbol sequence.
    pub fn push_word(
        &mut self,
        word: &str,
    ) -> Result<Word<T>, TrainError> {
        if self.vocab.mode() == AlphabetMode::Character {
            for c in word.chars() {
                self.vocab.intern_char(c)?;
            }
            self.vocab.intern_end_of_word()?;
        }

        self.tokens.clear();
        self.vocab.append_base_tokens(word, &mut self.tokens);
        Ok(Word::from_tokens(&self.tokens))
    }

    /// Build the words and count table for an ordered ``(word, count)`` table.
    ///
    /// # Returns
    /// ``(words, counts)`` where `counts[i]` is the occurrence count of `words[i]`.
    pub fn push_word_counts<K, C>(
        &mut self,
        word_counts: &[(K, C)],
    ) -> Result<(Vec<Word<T>>, Vec<C>), TrainError>
    where
        K: StringChunkType,
        C: CountType,
    {
        let mut words = Vec::with_capacity(word_counts.len());
        let mut counts = Vec::with_capacity(word_counts.len());
        for (word, count) in word_counts {
            words.push(self.push_word(word.as_ref())?);
            counts.push(*count);
        }
        Ok((words, counts))
    }

    /// Release the base vocabulary.
    ///
    /// In character mode the end-of-word marker is always present,
    /// even when no word was pushed.
    pub fn release(mut self) -> Result<Vocabulary<T>, TrainError> {
        if self.vocab.mode() == AlphabetMode::Character {
            self.vocab.intern_end_of_word()?;
        }
        Ok(self.vocab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{SpecialToken, Symbol};

    #[test]
    fn test_character_alphabet_order() {
        let mut builder = AlphabetBuilder::<u32>::new(AlphabetMode::Character).unwrap();

        let (words, counts) = builder
            .push_word_counts(&[("low".to_string(), 2_u32), ("owe".to_string(), 1)])
            .unwrap();

        assert_eq!(counts, vec![2, 1]);
        assert_eq!(words[0].tokens(), &[4, 5, 6, 7]);
        assert_eq!(words[1].tokens(), &[5, 6, 8, 7]);

        let vocab = builder.release().unwrap();
        assert_eq!(
            &vocab.symbols()[4..],
            &[
                Symbol::Char('l'),
                Symbol::Char('o'),
                Symbol::Char('w'),
                Symbol::EndOfWord,
                Symbol::Char('e'),
            ]
        );
        assert!(vocab.merge_rules().is_empty());
    }

    #[test]
    fn test_byte_alphabet() {
        let mut builder = AlphabetBuilder::<u16>::new(AlphabetMode::Byte).unwrap();

        let word = builder.push_word("hé").unwrap();
        // 'h' = 0x68, 'é' = 0xC3 0xA9; byte b has identifier b + 4.
        assert_eq!(word.tokens(), &[0x68 + 4, 0xC3 + 4, 0xA9 + 4]);

        let vocab = builder.release().unwrap();
        assert_eq!(vocab.len(), 260);
        assert_eq!(vocab.end_of_word_token(), None);
        assert_eq!(vocab.token_for(&Symbol::Special(SpecialToken::End)), Some(3));
    }

    #[test]
    fn test_release_interns_marker() {
        let builder = AlphabetBuilder::<u32>::new(AlphabetMode::Character).unwrap();
        let vocab = builder.release().unwrap();
        assert_eq!(vocab.symbols()[4..], [Symbol::EndOfWord]);
        assert_eq!(vocab.end_of_word_token(), Some(4));

        // An existing marker keeps its first-appearance slot.
        let mut builder = AlphabetBuilder::<u32>::new(AlphabetMode::Character).unwrap();
        builder.push_word("ab").unwrap();
        let vocab = builder.release().unwrap();
        assert_eq!(vocab.end_of_word_token(), Some(6));
        assert_eq!(vocab.len(), 7);
    }
}
