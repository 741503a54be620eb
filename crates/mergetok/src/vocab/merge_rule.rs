//! # Merge Rules

use crate::types::{Pair, TokenType};
use serde::{Deserialize, Serialize};

/// A learned merge: ``pair -> token`` at ``rank``.
///
/// Ranks are contiguous from 0, and tokens grow with rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(serialize = "T: TokenType", deserialize = "T: TokenType"))]
pub struct MergeRule<T: TokenType> {
    /// The adjacent pair to merge.
    pub pair: Pair<T>,

    /// The identifier of the merged symbol.
    pub token: T,

    /// The 0-based order in which the merge was learned.
    pub rank: usize,
}
