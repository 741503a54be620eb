//! # Vocabulary

pub mod io;
pub mod merge_rule;
pub mod symbol;
pub mod vocabulary;

pub use merge_rule::*;
pub use symbol::*;
pub use vocabulary::*;
