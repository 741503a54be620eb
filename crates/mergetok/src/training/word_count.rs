//! # Word Counting

use crate::segmentation::TextSegmentor;
use crate::types::{AlphabetMode, CountType, StringChunkType};
use ahash::AHashMap;
use std::collections::hash_map::Entry;

/// Ordered word counter.
///
/// Accumulates the distinct items of a corpus, in first-appearance order,
/// with their occurrence counts.
#[derive(Debug, Clone)]
pub struct WordCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    segmentor: TextSegmentor,

    /// Map from word to its index in `word_counts`.
    index: AHashMap<K, usize>,

    /// ``(word, count)`` in first-appearance order.
    word_counts: Vec<(K, C)>,
}

impl<K, C> WordCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create a new word counter.
    pub fn new(mode: AlphabetMode) -> Self {
        Self {
            segmentor: TextSegmentor::new(mode),
            index: Default::default(),
            word_counts: Vec::new(),
        }
    }

    /// The alphabet mode used for segmentation.
    pub fn mode(&self) -> AlphabetMode {
        self.segmentor.mode()
    }

    /// The number of distinct words.
    pub fn len(&self) -> usize {
        self.word_counts.len()
    }

    /// Returns `true` if no words have been counted.
    pub fn is_empty(&self) -> bool {
        self.word_counts.is_empty()
    }

    /// Get the ``(word, count)`` table, in first-appearance order.
    pub fn word_counts(&self) -> &[(K, C)] {
        &self.word_counts
    }

    /// Release the ``(word, count)`` table.
    pub fn release(self) -> Vec<(K, C)> {
        self.word_counts
    }

    /// Count a single word.
    pub fn observe_word(
        &mut self,
        word: &str,
    ) {
        let k: K = word.into();
        match self.index.entry(k) {
            Entry::Occupied(e) => {
                self.word_counts[*e.get()].1 += C::one();
            }
            Entry::Vacant(e) => {
                self.word_counts.push((e.key().clone(), C::one()));
                e.insert(self.word_counts.len() - 1);
            }
        }
    }

    /// Update word counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        let segmentor = self.segmentor;
        for word in segmentor.split_words(text.as_ref()) {
            self.observe_word(word);
        }
    }

    /// Update word counts inplace from a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }
}
