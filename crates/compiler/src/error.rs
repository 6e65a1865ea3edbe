//! Error types for the bfvm compiler.

use thiserror::Error;

/// Errors produced while compiling program text to an instruction stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `]` with no open `[`, or a `[` left unclosed at the end.
    ///
    /// `at` is the instruction index of the offending bracket. For an
    /// unclosed `[` it is the innermost one.
    #[error("mismatched bracket at instruction {at}")]
    MismatchedBracket { at: usize },

    /// The stream would hold more instructions than a `u32` can index.
    #[error("program oversized: {count} instructions (limit {})", u32::MAX)]
    ProgramOversized { count: usize },

    /// Jump resolution failed on an optimized stream whose input was
    /// balanced. This is a compiler bug, not a user error.
    #[error("optimizer produced an unbalanced stream at instruction {at}")]
    Inconsistent { at: usize },
}
