//! # Vocabulary IO
//!
//! Vocabularies persist as JSON: the alphabet mode and the ordered symbol arena.
//! Loading re-validates the identifier layout and rebuilds the merge rules.

use crate::types::TokenType;
use crate::vocab::Vocabulary;
use anyhow::Context;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Load a [`Vocabulary`] from a JSON file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocabulary_json<T, P>(path: P) -> anyhow::Result<Vocabulary<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open vocabulary: {}", path.display()))?;
    let reader = BufReader::new(file);

    let vocab: Vocabulary<T> = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse vocabulary: {}", path.display()))?;

    log::debug!(
        "Loaded {:?} vocabulary: {} symbols, {} merges",
        vocab.mode(),
        vocab.len(),
        vocab.merge_rules().len()
    );
    Ok(vocab)
}

/// Save a [`Vocabulary`] to a JSON file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocabulary_json<T: TokenType, P: AsRef<Path>>(
    vocab: &Vocabulary<T>,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create vocabulary: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, vocab)?;
    writer.flush()?;

    Ok(())
}
