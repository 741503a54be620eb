//! # Token Decoder Trait

use crate::decoders::DecodeContext;
use crate::errors::DecodeError;
use crate::types::TokenType;

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes the context until `ctx.stack` is empty.
    ///
    /// On error, the offending token is left on top of `ctx.stack`.
    fn decode_context(
        &self,
        ctx: &mut DecodeContext<T>,
    ) -> Result<(), DecodeError<T>>;

    /// Decodes tokens into their concatenated bytes.
    ///
    /// # Arguments
    /// * `tokens` - A slice of tokens to decode.
    fn try_decode_to_bytes<S: AsRef<[T]>>(
        &self,
        tokens: S,
    ) -> Result<Vec<u8>, DecodeError<T>> {
        let mut ctx = DecodeContext::for_tokens(tokens.as_ref().to_vec(), 2);
        self.decode_context(&mut ctx)?;
        Ok(ctx.buf)
    }

    /// Decodes a batch of tokens into a vector of byte vectors.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[Vec<T>],
    ) -> Result<Vec<Vec<u8>>, DecodeError<T>> {
        batch.iter().map(|t| self.try_decode_to_bytes(t)).collect()
    }

    /// Decodes tokens into a string.
    fn try_decode_to_string<S: AsRef<[T]>>(
        &self,
        tokens: S,
    ) -> Result<String, DecodeError<T>> {
        Ok(String::from_utf8(self.try_decode_to_bytes(tokens)?)?)
    }

    /// Decodes a batch of tokens into a vector of strings.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[Vec<T>],
    ) -> Result<Vec<String>, DecodeError<T>> {
        batch.iter().map(|t| self.try_decode_to_string(t)).collect()
    }
}
