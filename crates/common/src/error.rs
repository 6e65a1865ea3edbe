//! Decode errors for binary instruction streams.

use thiserror::Error;

/// Errors that occur while decoding an encoded program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The kind tag byte is not one of the nine defined kinds.
    #[error("invalid instruction kind: {0:#04x}")]
    InvalidKind(u8),

    /// Padding bytes 1-3 of an encoded instruction must be zero.
    #[error("non-zero padding in instruction {at}")]
    NonZeroPadding { at: usize },

    /// Byte stream length is not a multiple of 8.
    #[error("invalid byte stream length: {0} (must be multiple of 8)")]
    InvalidLength(usize),
}
