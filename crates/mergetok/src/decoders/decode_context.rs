//! # Decoder Context

use crate::types::TokenType;

/// Representation of a token decoding context.
#[derive(Debug, Clone)]
pub struct DecodeContext<T: TokenType> {
    /// Append buffer for decoded bytes.
    pub buf: Vec<u8>,

    /// FILO stack of tokens to be decoded.
    pub stack: Vec<T>,
}

impl<T: TokenType> DecodeContext<T> {
    /// Creates a new decoding context.
    pub fn for_tokens(
        tokens: Vec<T>,
        size_hint: usize,
    ) -> Self {
        let buf = Vec::with_capacity(tokens.len() * size_hint);
        let mut stack = tokens;
        stack.reverse();
        Self { buf, stack }
    }

    /// Is complete?
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tokens() {
        let ctx = DecodeContext::<u32>::for_tokens(vec![7, 8, 9], 4);
        assert_eq!(ctx.stack, vec![9, 8, 7]);
        assert!(ctx.buf.is_empty());
        assert!(ctx.buf.capacity() >= 12);
        assert!(!ctx.is_complete());

        let ctx = DecodeContext::<u32>::for_tokens(vec![], 4);
        assert!(ctx.is_complete());
    }
}
