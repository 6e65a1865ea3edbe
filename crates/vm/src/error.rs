//! Runtime errors for the bfvm machine and reference interpreter.
//!
//! Every error includes the position (`at`) where execution stopped: an
//! instruction index for the bytecode machine, a source byte offset for
//! the reference interpreter.

use std::io;
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A value access, I/O or bracket test with the data pointer outside
    /// the tape. Deterministic for a given program and tape length.
    #[error("data pointer {pointer} outside tape of length {len} at {at}")]
    OutOfBounds { at: usize, pointer: usize, len: usize },

    /// The reference interpreter found no partner for a taken bracket.
    #[error("unmatched bracket at source offset {at}")]
    UnmatchedBracket { at: usize },

    /// The run dispatched `limit` steps without halting.
    #[error("step limit {limit} exceeded at {at}")]
    StepLimitExceeded { at: usize, limit: u64 },

    /// The input or output collaborator failed.
    #[error("i/o error at {at}: {message}")]
    Io {
        at: usize,
        kind: io::ErrorKind,
        message: String,
    },
}

impl RuntimeError {
    pub(crate) fn io(at: usize, err: &io::Error) -> Self {
        RuntimeError::Io {
            at,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
