//! # Vocab Trainer

use crate::errors::TrainError;
use crate::training::alphabet::AlphabetBuilder;
use crate::training::pair_index::PairIndex;
use crate::training::word::Word;
use crate::training::word_count::WordCounter;
use crate::types::{AlphabetMode, CountType, Pair, StringChunkType, TokenType};
use crate::vocab::Vocabulary;
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use core::cmp::{Ordering, Reverse};
use dary_heap::OctonaryHeap;

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpeTrainerOptions {
    /// The initial alphabet.
    pub mode: AlphabetMode,

    /// The maximum number of merges to learn.
    pub max_merges: usize,
}

impl BpeTrainerOptions {
    /// Create new options.
    pub fn new(
        mode: AlphabetMode,
        max_merges: usize,
    ) -> Self {
        Self { mode, max_merges }
    }

    /// Sets the alphabet mode.
    pub fn with_mode(
        self,
        mode: AlphabetMode,
    ) -> Self {
        Self { mode, ..self }
    }

    /// Sets the maximum number of merges.
    pub fn with_max_merges(
        self,
        max_merges: usize,
    ) -> Self {
        Self { max_merges, ..self }
    }

    /// Initializes a [`BpeTrainer`] from these options.
    ///
    /// # Parameters
    /// * `K` - the type used to store strings in the word counts.
    /// * `C` - the type used to store counts in the word counts.
    pub fn init<K, C>(self) -> BpeTrainer<K, C>
    where
        K: StringChunkType,
        C: CountType,
    {
        BpeTrainer::init(self)
    }

    /// Trains a [`Vocabulary`] over a sample iterator.
    pub fn train_from_samples<T, I>(
        self,
        samples: I,
    ) -> Result<TrainResults<T>, TrainError>
    where
        T: TokenType,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut trainer = self.init::<CompactString, u64>();
        trainer.update_from_samples(samples);
        trainer.train()
    }
}

/// Training results.
#[derive(Debug, Clone)]
pub struct TrainResults<T: TokenType> {
    /// The trained vocabulary, including its ordered merge rules.
    pub vocab: Vocabulary<T>,

    /// The number of distinct training words.
    pub word_count: usize,
}

/// Base-symbol widths of merged tokens.
///
/// Locates pair occurrences by base-symbol offset, which merges never shift.
#[derive(Debug, Default)]
pub struct SymbolWidths<T: TokenType> {
    merged: AHashMap<T, usize>,
}

impl<T: TokenType> SymbolWidths<T> {
    /// The number of base symbols `token` spans.
    pub fn width(
        &self,
        token: T,
    ) -> usize {
        self.merged.get(&token).copied().unwrap_or(1)
    }

    /// Record the width of a newly merged token.
    pub fn record_merge(
        &mut self,
        pair: Pair<T>,
        token: T,
    ) {
        let width = self.width(pair.0) + self.width(pair.1);
        self.merged.insert(token, width);
    }

    /// The base-symbol offset of the leftmost occurrence of `pair` in `word`.
    pub fn first_offset(
        &self,
        word: &Word<T>,
        pair: Pair<T>,
    ) -> Option<usize> {
        let pos = word.first_position(pair)?;
        Some(word.tokens()[..pos].iter().map(|&t| self.width(t)).sum())
    }
}

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Eq)]
pub struct MergeJob<T: TokenType, C: CountType> {
    /// The number of instances of this pair in the corpus.
    pub count: C,

    /// The ``(word index, base-symbol offset)`` of the first occurrence.
    ///
    /// A lower bound; occurrences of a pair only ever disappear.
    pub first: (usize, usize),

    /// The pair to merge.
    pub pair: Pair<T>,

    /// Word indices that may contain this pair.
    pub word_indices: AHashSet<usize>,
}

impl<T: TokenType, C: CountType> MergeJob<T, C> {
    /// Build a job, locating its first occurrence.
    ///
    /// `None` if no indexed word contains the pair.
    pub fn locate(
        pair: Pair<T>,
        count: C,
        word_indices: AHashSet<usize>,
        words: &[Word<T>],
        widths: &SymbolWidths<T>,
    ) -> Option<Self> {
        let mut job = Self {
            count,
            first: (0, 0),
            pair,
            word_indices,
        };
        job.first = job.find_first(words, widths)?;
        Some(job)
    }

    /// The job key.
    ///
    /// Max-heap by count, then by earliest first occurrence.
    pub fn heap_key(&self) -> (C, Reverse<(usize, usize)>, Pair<T>) {
        (self.count, Reverse(self.first), self.pair)
    }

    /// Find the current first occurrence, at or after `self.first`.
    ///
    /// Prunes indexed words that no longer contain the pair.
    pub fn find_first(
        &mut self,
        words: &[Word<T>],
        widths: &SymbolWidths<T>,
    ) -> Option<(usize, usize)> {
        let (hint, _) = self.first;
        if self.word_indices.contains(&hint)
            && let Some(offset) = widths.first_offset(&words[hint], self.pair)
        {
            return Some((hint, offset));
        }
        self.word_indices.remove(&hint);

        let mut candidates: Vec<usize> = self
            .word_indices
            .iter()
            .copied()
            .filter(|&idx| idx > hint)
            .collect();
        candidates.sort_unstable();

        for idx in candidates {
            match widths.first_offset(&words[idx], self.pair) {
                Some(offset) => return Some((idx, offset)),
                None => {
                    self.word_indices.remove(&idx);
                }
            }
        }
        None
    }
}

impl<T: TokenType, C: CountType> PartialEq for MergeJob<T, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<T: TokenType, C: CountType> PartialOrd for MergeJob<T, C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType, C: CountType> Ord for MergeJob<T, C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// Trainer for learning pair merges.
///
/// # Parameters
/// * `K` - the type used to store strings in the word counts.
/// * `C` - the type used to store counts in the word counts.
#[derive(Debug)]
pub struct BpeTrainer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: BpeTrainerOptions,

    /// The word counter.
    pub word_counter: WordCounter<K, C>,
}

impl<K, C> BpeTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`BpeTrainer`].
    pub fn init(options: BpeTrainerOptions) -> Self {
        let word_counter = WordCounter::new(options.mode);
        Self {
            options,
            word_counter,
        }
    }

    /// Update the word counts inplace from a text string.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        self.word_counter.update_from_text(text);
    }

    /// Update word counts inplace from a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.word_counter.update_from_samples(samples);
    }

    /// Trains a [`Vocabulary<T>`] over the counted words.
    ///
    /// Stops after `max_merges` merges, or when no pair occurs at least twice.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train<T: TokenType>(self) -> Result<TrainResults<T>, TrainError> {
        let word_counts = self.word_counter.release();
        let word_count = word_counts.len();

        let mut alphabet = AlphabetBuilder::<T>::new(self.options.mode)?;
        let (words, counts) = alphabet.push_word_counts(&word_counts)?;
        drop(word_counts);

        let vocab = train_merges(
            alphabet.release()?,
            words,
            &counts,
            self.options.max_merges,
        )?;

        Ok(TrainResults { vocab, word_count })
    }
}

/// Learn up to `max_merges` merges over ``(words, counts)``, extending `vocab`.
///
/// # Arguments
/// * `vocab` - the base vocabulary the words were built against.
/// * `words` - the words, in first-appearance order; takes ownership.
/// * `word_counts` - `word_counts[i]` is the occurrence count of `words[i]`.
/// * `max_merges` - the merge budget.
pub fn train_merges<T, C>(
    mut vocab: Vocabulary<T>,
    mut words: Vec<Word<T>>,
    word_counts: &[C],
    max_merges: usize,
) -> Result<Vocabulary<T>, TrainError>
where
    T: TokenType,
    C: CountType,
{
    log::info!(
        "Starting BPE training: {} words, up to {} merges",
        words.len(),
        max_merges
    );

    let PairIndex {
        mut pair_counts,
        pair_to_word_index,
    } = PairIndex::index_unique_word_counts_table(&words, word_counts);

    let zero = C::zero();
    let two = C::one() + C::one();

    let mut widths = SymbolWidths::default();

    // ---- Build heap ----
    log::info!("Building heap with {} unique pairs", pair_counts.len());
    let mut heap = OctonaryHeap::with_capacity(pair_counts.len());
    for (pair, word_indices) in pair_to_word_index.into_iter() {
        let count = *pair_counts.get(&pair).unwrap_or(&zero);
        if count > zero
            && let Some(job) = MergeJob::locate(pair, count, word_indices, &words, &widths)
        {
            heap.push(job);
        }
    }

    // ---- Merge loop ----
    let mut merges_done = 0;
    let mut last_log_percent = 0;

    while merges_done < max_merges {
        let Some(mut job) = heap.pop() else {
            break;
        };

        {
            // Lazy refresh the job count; stored counts only ever overestimate.
            let current = *pair_counts.get(&job.pair).unwrap_or(&zero);
            if job.count != current {
                job.count = current;
                if job.count > zero {
                    heap.push(job);
                }
                continue;
            }
        }

        if job.count < two {
            // Merging a pair seen once yields no compression.
            break;
        }

        {
            // Lazy refresh the first occurrence; stored positions only ever underestimate.
            match job.find_first(&words, &widths) {
                None => continue,
                Some(first) if first != job.first => {
                    job.first = first;
                    heap.push(job);
                    continue;
                }
                Some(_) => {}
            }
        }

        let rule = vocab.push_merge(job.pair)?;
        let new_token = rule.token;
        widths.record_merge(job.pair, new_token);

        // Merge this pair in all words where it occurs
        let mut local_pos_updates: AHashMap<Pair<T>, AHashSet<usize>> =
            AHashMap::with_capacity(16);
        for &word_idx in &job.word_indices {
            let weight = word_counts[word_idx];
            words[word_idx].merge_pair_cb(job.pair, new_token, &mut |pair, delta| {
                if delta < 0 {
                    *pair_counts.entry(pair).or_default() -= weight;
                }
                if delta > 0 {
                    *pair_counts.entry(pair).or_default() += weight;
                    local_pos_updates.entry(pair).or_default().insert(word_idx);
                }
            });
        }
        pair_counts.remove(&job.pair);

        // Every new pair contains `new_token`, so these are fresh jobs.
        for (pair, word_indices) in local_pos_updates {
            let count = *pair_counts.get(&pair).unwrap_or(&zero);
            if count > zero
                && let Some(job) = MergeJob::locate(pair, count, word_indices, &words, &widths)
            {
                heap.push(job);
            }
        }

        merges_done += 1;

        log::debug!(
            "Merge {}: {:?} -> {:?} (frequency: {})",
            rule.rank,
            rule.pair,
            new_token,
            job.count
        );

        let current_percent = (merges_done * 100) / max_merges;
        if current_percent > last_log_percent {
            log::info!(
                "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {:?} (frequency: {})",
                current_percent,
                merges_done,
                max_merges,
                job.pair,
                new_token,
                job.count
            );
            last_log_percent = current_percent;
        }
    }

    log::info!("Finished training: {} merges completed", merges_done);

    Ok(vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{SpecialToken, Symbol};

    #[test]
    fn test_trainer_options() {
        let options = BpeTrainerOptions::new(AlphabetMode::Character, 10);
        assert_eq!(options.mode, AlphabetMode::Character);
        assert_eq!(options.max_merges, 10);

        let options = options
            .with_mode(AlphabetMode::Byte)
            .with_max_merges(20);
        assert_eq!(options.mode, AlphabetMode::Byte);
        assert_eq!(options.max_merges, 20);
    }

    fn merged_spans<T: TokenType>(vocab: &Vocabulary<T>) -> Vec<String> {
        vocab
            .merge_rules()
            .iter()
            .map(|r| String::from_utf8(vocab.span(r.token).unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_low_lower_lowest() {
        let TrainResults { vocab, word_count } = BpeTrainerOptions::new(AlphabetMode::Character, 10)
            .train_from_samples::<u32, _>(["low", "lower", "lowest"])
            .unwrap();

        assert_eq!(word_count, 3);

        // (l,o), (o,w) tie at 3; (l,o) occurs first. Then (lo,w) at 3, (low,e) at 2.
        // Nothing else occurs twice.
        assert_eq!(merged_spans(&vocab), vec!["lo", "low", "lowe"]);

        // Base alphabet in first-appearance order, marker after the first word.
        assert_eq!(
            &vocab.symbols()[4..12],
            &[
                Symbol::Char('l'),
                Symbol::Char('o'),
                Symbol::Char('w'),
                Symbol::EndOfWord,
                Symbol::Char('e'),
                Symbol::Char('r'),
                Symbol::Char('s'),
                Symbol::Char('t'),
            ]
        );
        assert_eq!(vocab.symbols()[12], Symbol::Merged((4, 5)));
        assert_eq!(vocab.symbols()[13], Symbol::Merged((12, 6)));
        assert_eq!(vocab.symbols()[14], Symbol::Merged((13, 8)));
        assert_eq!(vocab.len(), 15);
    }

    #[test]
    fn test_weighted_counts() {
        // "lower" x2 makes (e,r), (r,</w>), (w,e) frequent enough to merge.
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Character, 100)
            .train_from_samples::<u32, _>(["low lower lower", "lowest"])
            .unwrap();

        let spans = merged_spans(&vocab);
        assert_eq!(spans[0], "lo");
        assert_eq!(spans[1], "low");
        assert!(spans.contains(&"lower</w>".to_string()));

        let ranks: Vec<usize> = vocab.merge_rules().iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (0..ranks.len()).collect::<Vec<_>>());

        // The repeated word encodes as one merged unit, not per-character ids.
        let ids = crate::encode("lower", &vocab);
        assert_eq!(ids.len(), 3);
        assert!(matches!(vocab.symbol(ids[1]), Some(Symbol::Merged(_))));
        assert_eq!(vocab.span(ids[1]).unwrap(), b"lower</w>".to_vec());
    }

    #[test]
    fn test_tie_break_first_occurrence() {
        // (c,d) and (a,b) both occur twice; (c,d) is seen first.
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Character, 1)
            .train_from_samples::<u32, _>(["cd ab", "ab cd"])
            .unwrap();
        assert_eq!(merged_spans(&vocab), vec!["cd"]);

        // Within one word, the leftmost pair wins.
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Character, 1)
            .train_from_samples::<u32, _>(["xyzw", "xyzw"])
            .unwrap();
        assert_eq!(merged_spans(&vocab), vec!["xy"]);
    }

    #[test]
    fn test_max_merges_bound() {
        let samples = ["aaaa bbbb aaaa bbbb"];
        for max_merges in 0..4 {
            let TrainResults { vocab, .. } =
                BpeTrainerOptions::new(AlphabetMode::Character, max_merges)
                    .train_from_samples::<u32, _>(samples)
                    .unwrap();
            assert_eq!(vocab.merge_rules().len(), max_merges);
        }
    }

    #[test]
    fn test_overlapping_merges() {
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Character, 100)
            .train_from_samples::<u32, _>(["aaa aaa"])
            .unwrap();

        // "aaa</w>" x2: (a,a)=4, (a,</w>)=2 -> [aa, a, </w>]; then (aa,a)=2 -> [aaa, </w>];
        // then (aaa,</w>)=2.
        assert_eq!(merged_spans(&vocab), vec!["aa", "aaa", "aaa</w>"]);
    }

    #[test]
    fn test_no_repeats_no_merges() {
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Character, 50)
            .train_from_samples::<u32, _>(["x"])
            .unwrap();
        assert!(vocab.merge_rules().is_empty());
        assert_eq!(vocab.len(), 6);
    }

    #[test]
    fn test_empty_corpus() {
        for mode in [AlphabetMode::Character, AlphabetMode::Byte] {
            let TrainResults { vocab, word_count } = BpeTrainerOptions::new(mode, 50)
                .train_from_samples::<u32, _>(Vec::<String>::new())
                .unwrap();
            assert_eq!(word_count, 0);
            assert!(vocab.merge_rules().is_empty());
            assert_eq!(vocab.special(SpecialToken::End), 3);
        }
    }

    #[test]
    fn test_determinism() {
        let samples = vec![
            "hello world",
            "hello san francisco",
            "it's not the heat, it's the salt",
        ];
        for mode in [AlphabetMode::Character, AlphabetMode::Byte] {
            let first = BpeTrainerOptions::new(mode, 40)
                .train_from_samples::<u32, _>(samples.iter())
                .unwrap();
            let second = BpeTrainerOptions::new(mode, 40)
                .train_from_samples::<u32, _>(samples.iter())
                .unwrap();
            assert_eq!(first.vocab, second.vocab);
            assert_eq!(first.vocab.merge_rules(), second.vocab.merge_rules());
        }
    }

    #[test]
    fn test_byte_merges_stay_inside_runs() {
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Byte, 100)
            .train_from_samples::<u32, _>(["ab ab ab"])
            .unwrap();

        for span in merged_spans(&vocab) {
            assert!(
                !span.contains(' ') || span.trim().is_empty(),
                "merge crossed a run boundary: {span:?}"
            );
        }
        assert_eq!(merged_spans(&vocab)[0], "ab");
    }

    #[test]
    fn test_token_space_exhausted() {
        let err = BpeTrainerOptions::new(AlphabetMode::Byte, 10)
            .train_from_samples::<u8, _>(["abc"])
            .unwrap_err();
        assert!(matches!(err, TrainError::TokenSpaceExhausted { .. }));
    }

    #[test]
    fn test_many_ties_merge_in_scan_order() {
        // Every word holds one distinct pair, and every pair occurs twice.
        let words: Vec<String> = ('a'..='p')
            .flat_map(|a| ('q'..='z').map(move |b| format!("{a}{b}")))
            .collect();
        let samples: Vec<String> = words.iter().map(|w| format!("{w} {w}")).collect();

        let max_merges = words.len() + 10;
        let TrainResults { vocab, .. } = BpeTrainerOptions::new(AlphabetMode::Byte, max_merges)
            .train_from_samples::<u32, _>(samples.iter())
            .unwrap();

        assert_eq!(merged_spans(&vocab), words);
    }

    /// Full recount every round; ties go to the earliest ``(word index, position)``.
    fn recount_merge_spans(
        mode: AlphabetMode,
        samples: &[String],
        max_merges: usize,
    ) -> Vec<Vec<u8>> {
        let mut counter: WordCounter<CompactString, u64> = WordCounter::new(mode);
        counter.update_from_samples(samples);

        let mut spans: Vec<Vec<u8>> = Vec::new();
        let mut base: AHashMap<Vec<u8>, usize> = AHashMap::new();
        let mut words: Vec<(Vec<usize>, u64)> = Vec::new();
        for (word, count) in counter.word_counts() {
            let pieces: Vec<Vec<u8>> = match mode {
                AlphabetMode::Character => word
                    .chars()
                    .map(|c| c.to_string().into_bytes())
                    .chain([b"</w>".to_vec()])
                    .collect(),
                AlphabetMode::Byte => word.bytes().map(|b| vec![b]).collect(),
            };
            let mut ids = Vec::with_capacity(pieces.len());
            for piece in pieces {
                let id = match base.get(&piece) {
                    Some(&id) => id,
                    None => {
                        spans.push(piece.clone());
                        base.insert(piece, spans.len() - 1);
                        spans.len() - 1
                    }
                };
                ids.push(id);
            }
            words.push((ids, *count));
        }

        let mut merged = Vec::new();
        for _ in 0..max_merges {
            let mut stats: AHashMap<(usize, usize), (u64, (usize, usize))> = AHashMap::new();
            for (w, (ids, count)) in words.iter().enumerate() {
                for (pos, pair) in ids.windows(2).enumerate() {
                    stats.entry((pair[0], pair[1])).or_insert((0, (w, pos))).0 += *count;
                }
            }

            let Some((&pair, &(count, _))) = stats
                .iter()
                .max_by_key(|(_, (count, first))| (*count, Reverse(*first)))
            else {
                break;
            };
            if count < 2 {
                break;
            }

            let token = spans.len();
            spans.push([spans[pair.0].clone(), spans[pair.1].clone()].concat());
            merged.push(spans[token].clone());

            for (ids, _) in words.iter_mut() {
                let mut out = Vec::with_capacity(ids.len());
                let mut i = 0;
                while i < ids.len() {
                    if i + 1 < ids.len() && (ids[i], ids[i + 1]) == pair {
                        out.push(token);
                        i += 2;
                    } else {
                        out.push(ids[i]);
                        i += 1;
                    }
                }
                *ids = out;
            }
        }
        merged
    }

    fn pseudo_random_corpus(
        seed: u64,
        alphabet: &[char],
        lines: usize,
    ) -> Vec<String> {
        let mut state = seed;
        let mut next = |n: usize| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as usize) % n
        };

        let mut corpus = Vec::with_capacity(lines);
        for _ in 0..lines {
            let len = 1 + next(24);
            let mut line = String::new();
            for _ in 0..len {
                line.push(alphabet[next(alphabet.len())]);
            }
            corpus.push(line);
        }
        corpus
    }

    #[test]
    fn test_matches_full_recount() {
        let alphabet = ['a', 'b', 'c', 'a', 'b', ' ', ' ', 'é'];
        for seed in 0..20 {
            let samples = pseudo_random_corpus(seed, &alphabet, 12);
            for mode in [AlphabetMode::Character, AlphabetMode::Byte] {
                let TrainResults { vocab, .. } = BpeTrainerOptions::new(mode, 30)
                    .train_from_samples::<u32, _>(samples.iter())
                    .unwrap();
                let learned: Vec<Vec<u8>> = vocab
                    .merge_rules()
                    .iter()
                    .map(|r| vocab.span(r.token).unwrap())
                    .collect();

                assert_eq!(
                    learned,
                    recount_merge_spans(mode, &samples, 30),
                    "seed {seed}, {mode:?}"
                );
            }
        }
    }

    #[test]
    fn test_merge_job_heap_key() {
        let job = |count: u32, first: (usize, usize), pair: (u32, u32)| MergeJob {
            count,
            first,
            pair,
            word_indices: Default::default(),
        };
        let a = job(3, (0, 2), (4, 5));
        let b = job(2, (0, 0), (5, 4));
        let c = job(3, (1, 0), (6, 7));

        assert_eq!(a.heap_key(), (3, Reverse((0, 2)), (4, 5)));
        assert_eq!(&a, &a);
        assert_ne!(&a, &c);

        // Count first, then the earliest first occurrence.
        assert_eq!(a.cmp(&b), Ordering::Greater);
        assert_eq!(a.cmp(&c), Ordering::Greater);
        assert_eq!(c.partial_cmp(&a), Some(Ordering::Less));

        let mut heap = OctonaryHeap::new();
        heap.push(b);
        heap.push(c);
        heap.push(a);
        let order: Vec<(u32, u32)> = std::iter::from_fn(|| heap.pop().map(|j| j.pair)).collect();
        assert_eq!(order, vec![(4, 5), (6, 7), (5, 4)]);
    }

    #[test]
    fn test_symbol_widths() {
        let mut widths = SymbolWidths::<u32>::default();
        assert_eq!(widths.width(4), 1);

        widths.record_merge((4, 5), 9);
        widths.record_merge((9, 9), 10);
        assert_eq!(widths.width(9), 2);
        assert_eq!(widths.width(10), 4);

        let word = Word::<u32>::from_tokens([10, 6, 4, 5]);
        assert_eq!(widths.first_offset(&word, (4, 5)), Some(5));
        assert_eq!(widths.first_offset(&word, (6, 6)), None);
    }

    #[test]
    fn test_merge_job_locate() {
        let mut widths = SymbolWidths::<u32>::default();
        widths.record_merge((4, 5), 9);

        let mut words = vec![
            Word::<u32>::from_tokens([6, 7]),
            Word::<u32>::from_tokens([9, 6, 4, 5]),
            Word::<u32>::from_tokens([4, 5]),
        ];

        // Word 0 is a stale index; offsets count base symbols.
        let mut job =
            MergeJob::locate((4, 5), 2_u32, [0, 1, 2].into_iter().collect(), &words, &widths)
                .unwrap();
        assert_eq!(job.first, (1, 3));
        assert!(!job.word_indices.contains(&0));

        // The first occurrence only moves later.
        words[1] = Word::from_tokens([9, 6, 9]);
        assert_eq!(job.find_first(&words, &widths), Some((2, 0)));
        assert!(!job.word_indices.contains(&1));

        assert!(
            MergeJob::locate((7, 7), 1_u32, [0].into_iter().collect(), &words, &widths).is_none()
        );
    }
}
