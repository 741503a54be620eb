//! # Vocabulary
//!
//! The identifier space is laid out in creation order:
//! * the special tokens at ``0..=3``,
//! * the base alphabet, in first-appearance order (character mode)
//!   or as bytes ``0..=255`` ascending (byte mode),
//! * the merged symbols, in rank order.
//!
//! A [`Vocabulary`] is built once by training and is read-only afterwards;
//! share it behind an `Arc`.

use crate::errors::{TrainError, VocabularyError};
use crate::types::{AlphabetMode, Pair, PairToTokenMap, TokenType, token_from_index, token_to_index};
use crate::vocab::merge_rule::MergeRule;
use crate::vocab::symbol::{END_OF_WORD_LITERAL, SpecialToken, Symbol};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The number of byte values.
pub const U8_SIZE: usize = 256;

/// The number of fixed special tokens.
pub const SPECIAL_COUNT: usize = SpecialToken::ALL.len();

/// Token-bytes to T map.
pub type SpanToTokenMap<T> = AHashMap<Vec<u8>, T>;

/// Bijective ``Symbol <-> T`` vocabulary with its ordered merge rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary<T: TokenType> {
    mode: AlphabetMode,

    /// ``symbols[id]`` is the symbol for identifier ``id``.
    symbols: Vec<Symbol<T>>,

    specials: [T; SPECIAL_COUNT],
    char_tokens: AHashMap<char, T>,
    end_of_word: Option<T>,
    byte_tokens: Vec<T>,

    pair_tokens: PairToTokenMap<T>,
    merges: Vec<MergeRule<T>>,
}

impl<T: TokenType> Vocabulary<T> {
    /// Create a vocabulary holding the special tokens and, in byte mode, all 256 bytes.
    pub fn new(mode: AlphabetMode) -> Result<Self, TrainError> {
        let specials = [0, 1, 2, 3].map(T::from_usize);
        let [Some(pad), Some(unk), Some(bos), Some(eos)] = specials else {
            return Err(TrainError::TokenSpaceExhausted {
                size: SPECIAL_COUNT,
            });
        };

        let mut vocab = Self {
            mode,
            symbols: SpecialToken::ALL.iter().map(|&s| Symbol::Special(s)).collect(),
            specials: [pad, unk, bos, eos],
            char_tokens: Default::default(),
            end_of_word: None,
            byte_tokens: Vec::new(),
            pair_tokens: Default::default(),
            merges: Vec::new(),
        };

        if mode == AlphabetMode::Byte {
            vocab.byte_tokens.reserve(U8_SIZE);
            for b in 0..=u8::MAX {
                let token = vocab.push_symbol(Symbol::Byte(b))?;
                vocab.byte_tokens.push(token);
            }
        }

        Ok(vocab)
    }

    fn next_token(&self) -> Option<T> {
        token_from_index(self.symbols.len())
    }

    fn push_symbol(
        &mut self,
        symbol: Symbol<T>,
    ) -> Result<T, TrainError> {
        let token = self
            .next_token()
            .ok_or(TrainError::TokenSpaceExhausted {
                size: self.symbols.len() + 1,
            })?;
        self.symbols.push(symbol);
        Ok(token)
    }

    /// Intern a base character, returning its identifier.
    ///
    /// Only meaningful in character mode, and only before any merge is recorded.
    pub(crate) fn intern_char(
        &mut self,
        c: char,
    ) -> Result<T, TrainError> {
        if let Some(&token) = self.char_tokens.get(&c) {
            return Ok(token);
        }
        let token = self.push_symbol(Symbol::Char(c))?;
        self.char_tokens.insert(c, token);
        Ok(token)
    }

    /// Intern the end-of-word marker, returning its identifier.
    pub(crate) fn intern_end_of_word(&mut self) -> Result<T, TrainError> {
        if let Some(token) = self.end_of_word {
            return Ok(token);
        }
        let token = self.push_symbol(Symbol::EndOfWord)?;
        self.end_of_word = Some(token);
        Ok(token)
    }

    /// Record the next merge rule for `pair`.
    pub(crate) fn push_merge(
        &mut self,
        pair: Pair<T>,
    ) -> Result<MergeRule<T>, TrainError> {
        let token = self.push_symbol(Symbol::Merged(pair))?;
        let rule = MergeRule {
            pair,
            token,
            rank: self.merges.len(),
        };
        self.pair_tokens.insert(pair, token);
        self.merges.push(rule);
        Ok(rule)
    }

    /// The alphabet mode.
    pub fn mode(&self) -> AlphabetMode {
        self.mode
    }

    /// The number of identifiers.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; the special tokens are always present.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols, in identifier order.
    pub fn symbols(&self) -> &[Symbol<T>] {
        &self.symbols
    }

    /// The symbol for `token`, if assigned.
    pub fn symbol(
        &self,
        token: T,
    ) -> Option<&Symbol<T>> {
        token_to_index(token).and_then(|idx| self.symbols.get(idx))
    }

    /// The identifier of a special token.
    pub fn special(
        &self,
        special: SpecialToken,
    ) -> T {
        self.specials[special.index()]
    }

    /// The identifier of a base character.
    pub fn char_token(
        &self,
        c: char,
    ) -> Option<T> {
        self.char_tokens.get(&c).copied()
    }

    /// The identifier of the end-of-word marker; character mode only.
    pub fn end_of_word_token(&self) -> Option<T> {
        self.end_of_word
    }

    /// The identifier of a byte value; byte mode only.
    pub fn byte_token(
        &self,
        b: u8,
    ) -> Option<T> {
        self.byte_tokens.get(b as usize).copied()
    }

    /// The identifier a pair merges into, if a merge rule exists for it.
    pub fn merge_token(
        &self,
        pair: &Pair<T>,
    ) -> Option<T> {
        self.pair_tokens.get(pair).copied()
    }

    /// The identifier of `symbol`, if it is in the vocabulary.
    pub fn token_for(
        &self,
        symbol: &Symbol<T>,
    ) -> Option<T> {
        match symbol {
            Symbol::Special(s) => Some(self.special(*s)),
            Symbol::Char(c) => self.char_token(*c),
            Symbol::EndOfWord => self.end_of_word,
            Symbol::Byte(b) => self.byte_token(*b),
            Symbol::Merged(pair) => self.merge_token(pair),
        }
    }

    /// Append the base symbol identifiers of a single word to `tokens`.
    ///
    /// * character mode: one identifier per character, then the end-of-word marker;
    ///   characters outside the alphabet map to the unknown token.
    /// * byte mode: one identifier per byte.
    pub fn append_base_tokens(
        &self,
        word: &str,
        tokens: &mut Vec<T>,
    ) {
        let unk = self.special(SpecialToken::Unknown);
        match self.mode {
            AlphabetMode::Character => {
                tokens.extend(word.chars().map(|c| self.char_token(c).unwrap_or(unk)));
                tokens.push(self.end_of_word.unwrap_or(unk));
            }
            AlphabetMode::Byte => {
                tokens.extend(word.bytes().map(|b| self.byte_token(b).unwrap_or(unk)));
            }
        }
    }

    /// The merge rules, in rank order.
    pub fn merge_rules(&self) -> &[MergeRule<T>] {
        &self.merges
    }

    /// The highest assigned identifier.
    pub fn max_token(&self) -> T {
        // Every pushed index was converted on the way in.
        T::from_usize(self.symbols.len() - 1).unwrap_or(self.specials[SPECIAL_COUNT - 1])
    }

    /// Append the literal bytes of `token` to `buf`.
    ///
    /// Specials and the end-of-word marker render as their literal forms.
    /// Returns `false` if `token` is unassigned.
    pub fn append_span(
        &self,
        token: T,
        buf: &mut Vec<u8>,
    ) -> bool {
        let mut stack = vec![token];
        while let Some(t) = stack.pop() {
            match self.symbol(t) {
                None => return false,
                Some(Symbol::Special(s)) => buf.extend_from_slice(s.literal().as_bytes()),
                Some(Symbol::Char(c)) => {
                    let mut tmp = [0_u8; 4];
                    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
                }
                Some(Symbol::EndOfWord) => buf.extend_from_slice(END_OF_WORD_LITERAL.as_bytes()),
                Some(Symbol::Byte(b)) => buf.push(*b),
                Some(Symbol::Merged((a, b))) => {
                    stack.push(*b);
                    stack.push(*a);
                }
            }
        }
        true
    }

    /// The literal bytes of `token`, if assigned.
    pub fn span(
        &self,
        token: T,
    ) -> Option<Vec<u8>> {
        let mut buf = Vec::new();
        self.append_span(token, &mut buf).then_some(buf)
    }

    /// The ``{ token-bytes -> T }`` view of the vocabulary.
    ///
    /// An inspection view; in character mode a merged span can collide
    /// with the literal marker or special forms, the symbol arena cannot.
    pub fn span_map(&self) -> SpanToTokenMap<T> {
        let mut map = SpanToTokenMap::with_capacity(self.symbols.len());
        for idx in 0..self.symbols.len() {
            if let Some(token) = T::from_usize(idx)
                && let Some(span) = self.span(token)
            {
                map.entry(span).or_insert(token);
            }
        }
        map
    }

    /// The merge rules as ``(left, right)`` literal byte pairs, in rank order.
    pub fn merge_spans(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.merges
            .iter()
            .filter_map(|rule| Some((self.span(rule.pair.0)?, self.span(rule.pair.1)?)))
            .collect()
    }
}

/// Serialized form of a [`Vocabulary`]: the mode and the ordered symbol arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: TokenType", deserialize = "T: TokenType"))]
pub struct VocabularyData<T: TokenType> {
    /// The alphabet mode.
    pub mode: AlphabetMode,

    /// ``symbols[id]`` is the symbol for identifier ``id``.
    pub symbols: Vec<Symbol<T>>,
}

impl<T: TokenType> From<Vocabulary<T>> for VocabularyData<T> {
    fn from(vocab: Vocabulary<T>) -> Self {
        Self {
            mode: vocab.mode,
            symbols: vocab.symbols,
        }
    }
}

impl<T: TokenType> TryFrom<VocabularyData<T>> for Vocabulary<T> {
    type Error = VocabularyError;

    fn try_from(data: VocabularyData<T>) -> Result<Self, Self::Error> {
        let exhausted = |size| VocabularyError::TokenSpaceExhausted { size };

        for (index, special) in SpecialToken::ALL.iter().enumerate() {
            if data.symbols.get(index) != Some(&Symbol::Special(*special)) {
                return Err(VocabularyError::MisplacedSpecial {
                    index,
                    expected: special.literal(),
                });
            }
        }

        let mut vocab = Vocabulary::new(data.mode).map_err(|_| exhausted(data.symbols.len()))?;
        let mut seen_merge = false;

        for (index, symbol) in data.symbols.iter().enumerate().skip(SPECIAL_COUNT) {
            if index < vocab.len() {
                // Byte mode pre-populates the byte range.
                if vocab.symbols[index] != *symbol {
                    return Err(VocabularyError::ForeignSymbol { index });
                }
                continue;
            }
            if vocab.token_for(symbol).is_some() {
                return Err(VocabularyError::DuplicateSymbol { index });
            }

            match (*symbol, data.mode) {
                (Symbol::Special(_), _) => {
                    return Err(VocabularyError::DuplicateSymbol { index });
                }
                (Symbol::Char(c), AlphabetMode::Character) => {
                    if seen_merge {
                        return Err(VocabularyError::BaseAfterMerge { index });
                    }
                    vocab.intern_char(c).map_err(|_| exhausted(index + 1))?;
                }
                (Symbol::EndOfWord, AlphabetMode::Character) => {
                    if seen_merge {
                        return Err(VocabularyError::BaseAfterMerge { index });
                    }
                    vocab.intern_end_of_word().map_err(|_| exhausted(index + 1))?;
                }
                (Symbol::Merged((a, b)), _) => {
                    let defined = |t: T| {
                        token_to_index(t).is_some_and(|i| i >= SPECIAL_COUNT && i < index)
                    };
                    if !defined(a) || !defined(b) {
                        return Err(VocabularyError::ForwardReference { index });
                    }
                    seen_merge = true;
                    vocab.push_merge((a, b)).map_err(|_| exhausted(index + 1))?;
                }
                _ => return Err(VocabularyError::ForeignSymbol { index }),
            }
        }

        if vocab.len() != data.symbols.len() {
            // Byte mode data truncated inside the byte range.
            return Err(VocabularyError::ForeignSymbol {
                index: data.symbols.len(),
            });
        }

        Ok(vocab)
    }
}

impl<T: TokenType> Serialize for Vocabulary<T> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        VocabularyData {
            mode: self.mode,
            symbols: self.symbols.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: TokenType> Deserialize<'de> for Vocabulary<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = VocabularyData::<T>::deserialize(deserializer)?;
        Vocabulary::try_from(data).map_err(serde::de::Error::custom)
    }
}
