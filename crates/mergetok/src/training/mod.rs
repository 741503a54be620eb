//! # Vocabulary Training

pub mod alphabet;
pub mod pair_index;
pub mod trainer;
pub mod word;
pub mod word_count;

pub use alphabet::*;
pub use pair_index::*;
pub use trainer::*;
pub use word::*;
pub use word_count::*;
