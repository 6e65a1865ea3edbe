//! The tagged instruction type and its 8-byte encoding.
//!
//! Each variant carries only the payload its kind needs: a signed repeat
//! count for the arithmetic kinds, a jump target for brackets, nothing for
//! I/O and no-ops.
//!
//! Encoding, 8 bytes little-endian:
//! ```text
//! Byte 0:    kind tag (u8, see `Kind`)
//! Bytes 1-3: zero
//! Bytes 4-7: payload (i32 count, u32 target, or zero)
//! ```

use crate::error::DecodeError;
use crate::kind::Kind;

/// A single instruction of the compiled stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Move the data pointer right by the count.
    IncPtr(i32),
    /// Move the data pointer left by the count.
    DecPtr(i32),
    /// Add the count to the current cell (mod 256).
    IncVal(i32),
    /// Subtract the count from the current cell (mod 256).
    DecVal(i32),
    /// Loop head; the payload is the index of the matching `LoopEnd`.
    LoopStart(u32),
    /// Loop tail; the payload is the index of the matching `LoopStart`.
    LoopEnd(u32),
    /// Read one input byte into the current cell.
    Read,
    /// Write the current cell as one output byte.
    Write,
    /// Commentary. Never survives optimization.
    Noop,
}

impl Instruction {
    /// Build the instruction for one source occurrence of `kind`.
    ///
    /// Count-bearing kinds start at 1; bracket targets start unresolved (0).
    pub fn single(kind: Kind) -> Self {
        Self::with_payload(kind, 1)
    }

    fn with_payload(kind: Kind, payload: i32) -> Self {
        match kind {
            Kind::IncPtr => Instruction::IncPtr(payload),
            Kind::DecPtr => Instruction::DecPtr(payload),
            Kind::IncVal => Instruction::IncVal(payload),
            Kind::DecVal => Instruction::DecVal(payload),
            Kind::LoopStart => Instruction::LoopStart(0),
            Kind::LoopEnd => Instruction::LoopEnd(0),
            Kind::Read => Instruction::Read,
            Kind::Write => Instruction::Write,
            Kind::Noop => Instruction::Noop,
        }
    }

    /// The kind of this instruction.
    pub fn kind(&self) -> Kind {
        match self {
            Instruction::IncPtr(_) => Kind::IncPtr,
            Instruction::DecPtr(_) => Kind::DecPtr,
            Instruction::IncVal(_) => Kind::IncVal,
            Instruction::DecVal(_) => Kind::DecVal,
            Instruction::LoopStart(_) => Kind::LoopStart,
            Instruction::LoopEnd(_) => Kind::LoopEnd,
            Instruction::Read => Kind::Read,
            Instruction::Write => Kind::Write,
            Instruction::Noop => Kind::Noop,
        }
    }

    /// The repeat count, for count-bearing kinds.
    pub fn count(&self) -> Option<i32> {
        match *self {
            Instruction::IncPtr(n)
            | Instruction::DecPtr(n)
            | Instruction::IncVal(n)
            | Instruction::DecVal(n) => Some(n),
            _ => None,
        }
    }

    /// Mutable access to the repeat count, for count-bearing kinds.
    pub fn count_mut(&mut self) -> Option<&mut i32> {
        match self {
            Instruction::IncPtr(n)
            | Instruction::DecPtr(n)
            | Instruction::IncVal(n)
            | Instruction::DecVal(n) => Some(n),
            _ => None,
        }
    }

    /// The jump target, for brackets.
    pub fn target(&self) -> Option<u32> {
        match *self {
            Instruction::LoopStart(t) | Instruction::LoopEnd(t) => Some(t),
            _ => None,
        }
    }

    /// Overwrite the jump target. No effect on non-bracket instructions.
    pub fn set_target(&mut self, target: u32) {
        if let Instruction::LoopStart(t) | Instruction::LoopEnd(t) = self {
            *t = target;
        }
    }

    /// True if this instruction has no effect at run time: a no-op or a
    /// fully cancelled arithmetic run.
    pub fn is_inert(&self) -> bool {
        matches!(self, Instruction::Noop) || self.count() == Some(0)
    }

    /// Encode this instruction to 8 bytes.
    pub fn encode(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.kind() as u8;
        let payload = match (self.count(), self.target()) {
            (Some(n), _) => n.to_le_bytes(),
            (_, Some(t)) => t.to_le_bytes(),
            _ => [0; 4],
        };
        bytes[4..8].copy_from_slice(&payload);
        bytes
    }

    /// Decode 8 bytes into an instruction.
    ///
    /// `at` is the instruction index, used only for error reporting.
    pub fn decode(bytes: [u8; 8], at: usize) -> Result<Self, DecodeError> {
        let kind = Kind::try_from(bytes[0])?;
        if bytes[1..4] != [0, 0, 0] {
            return Err(DecodeError::NonZeroPadding { at });
        }
        let raw = [bytes[4], bytes[5], bytes[6], bytes[7]];

        let mut instr = Self::with_payload(kind, i32::from_le_bytes(raw));
        if kind.is_bracket() {
            instr.set_target(u32::from_le_bytes(raw));
        }
        Ok(instr)
    }
}
