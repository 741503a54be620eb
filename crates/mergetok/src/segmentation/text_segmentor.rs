//! # Text Segmentor

use crate::types::AlphabetMode;

/// Whitespace Segmentor.
///
/// Splits text into the items that merges are confined to.
/// * [`AlphabetMode::Character`] - maximal non-whitespace runs; whitespace is dropped.
/// * [`AlphabetMode::Byte`] - maximal whitespace and non-whitespace runs;
///   the concatenation of the items is the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegmentor {
    mode: AlphabetMode,
}

impl From<AlphabetMode> for TextSegmentor {
    fn from(mode: AlphabetMode) -> Self {
        Self::new(mode)
    }
}

impl TextSegmentor {
    /// Create a new segmentor for the given alphabet mode.
    pub fn new(mode: AlphabetMode) -> Self {
        Self { mode }
    }

    /// The alphabet mode.
    pub fn mode(&self) -> AlphabetMode {
        self.mode
    }

    /// Split a chunk of text into items.
    ///
    /// Append to the `words` buffer.
    pub fn split_append_words<'a>(
        &self,
        text: &'a str,
        words: &mut Vec<&'a str>,
    ) {
        match self.mode {
            AlphabetMode::Character => words.extend(text.split_whitespace()),
            AlphabetMode::Byte => split_append_runs(text, words),
        }
    }

    /// Split a chunk of text into items.
    pub fn split_words<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        let mut words = Vec::new();
        self.split_append_words(text, &mut words);
        words
    }
}

/// Append maximal runs of same-class (whitespace / non-whitespace) characters.
fn split_append_runs<'a>(
    text: &'a str,
    words: &mut Vec<&'a str>,
) {
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let ws = c.is_whitespace();
        match current {
            Some(prev) if prev != ws => {
                words.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        current = Some(ws);
    }

    if start < text.len() {
        words.push(&text[start..]);
    }
}
