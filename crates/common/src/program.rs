//! Program representation: an ordered, mutable instruction stream.
//!
//! Binary files (.bfb) are raw concatenations of 8-byte instructions with
//! no header.

use crate::error::DecodeError;
use crate::instruction::Instruction;

/// A compiled program: a sequence of instructions in program order.
///
/// Indices are not stable across optimization; jump targets are
/// recomputed after every structural change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Encode the entire program to bytes.
    ///
    /// The result length is always `instructions.len() * 8`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.instructions.len() * 8);
        for instr in &self.instructions {
            bytes.extend_from_slice(&instr.encode());
        }
        bytes
    }

    /// Decode a byte slice into a program.
    ///
    /// Jump targets are taken as-is; callers that execute a decoded
    /// program should re-resolve them first.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() % 8 != 0 {
            return Err(DecodeError::InvalidLength(bytes.len()));
        }

        let mut instructions = Vec::with_capacity(bytes.len() / 8);
        for (at, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut arr = [0u8; 8];
            arr.copy_from_slice(chunk);
            instructions.push(Instruction::decode(arr, at)?);
        }

        Ok(Self { instructions })
    }

    /// Drop every instruction, keeping the allocation for reuse.
    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
