//! Common types for the bfvm toolchain.
//!
//! This crate provides the foundational data structures shared by the
//! compiler and the virtual machine:
//!
//! - [`Kind`]: the nine instruction kinds and their counterpart relation
//! - [`classify`]: the 256-entry source byte classifier
//! - [`Instruction`]: the tagged instruction with its per-kind payload
//! - [`Program`]: an ordered instruction stream with binary encoding
//! - [`DecodeError`]: errors from decoding byte streams

pub mod error;
pub mod instruction;
pub mod kind;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::Instruction;
pub use kind::{classify, Kind};
pub use program::Program;
