//! # Token Decoders

pub mod bpe_decoder;
pub mod decode_context;
pub mod token_decoder;

pub use bpe_decoder::*;
pub use decode_context::*;
pub use token_decoder::*;
