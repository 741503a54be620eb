//! # Encoders

pub mod merge_encoder;
pub mod token_encoder;

pub use merge_encoder::*;
pub use token_encoder::*;
