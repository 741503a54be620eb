//! Pair Count / Word Indexing

use crate::training::word::Word;
use crate::types::{CountType, Pair, TokenType};
use ahash::{AHashMap, AHashSet};

/// An index of [`Pair`]s over an index set of ``(word, count)``.
#[derive(Debug)]
pub struct PairIndex<T: TokenType, C: CountType> {
    /// A map from [`Pair`] to its weighted occurrence count.
    ///
    /// ``sum(words[i].adjacent_count(pair) * word_counts[i]) for all i``
    pub pair_counts: AHashMap<Pair<T>, C>,

    /// A map from [`Pair`] to indices over ``words``.
    pub pair_to_word_index: AHashMap<Pair<T>, AHashSet<usize>>,
}

impl<T: TokenType, C: CountType> PairIndex<T, C> {
    fn observe_word(
        pair_counts: &mut AHashMap<Pair<T>, C>,
        pair_to_word_index: &mut AHashMap<Pair<T>, AHashSet<usize>>,
        index: usize,
        w: &Word<T>,
        word_count: C,
    ) {
        if word_count != C::zero() && w.len() >= 2 {
            for p in w.pairs() {
                *pair_counts.entry(p).or_default() += word_count;
                pair_to_word_index.entry(p).or_default().insert(index);
            }
        }
    }

    /// Build a [`PairIndex`] from a slice of [`Word`]s, using a count table.
    ///
    /// # Arguments
    /// * `words` - the slice of words; Words are assumed to be unique.
    /// * `word_counts` - `word_counts[i]` is the count of `words[i]`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(words, word_counts))
    )]
    pub fn index_unique_word_counts_table(
        words: &[Word<T>],
        word_counts: &[C],
    ) -> Self {
        let mut pair_counts: AHashMap<Pair<T>, C> = Default::default();
        let mut pair_to_word_index: AHashMap<Pair<T>, AHashSet<usize>> = Default::default();

        for (word_index, (word, &count)) in words.iter().zip(word_counts).enumerate() {
            Self::observe_word(
                &mut pair_counts,
                &mut pair_to_word_index,
                word_index,
                word,
                count,
            );
        }

        Self {
            pair_counts,
            pair_to_word_index,
        }
    }
}
