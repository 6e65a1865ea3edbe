//! Instruction kinds and the source symbol classifier.
//!
//! The language has eight command symbols:
//! ```text
//! >  move the data pointer right
//! <  move the data pointer left
//! +  increment the cell under the pointer
//! -  decrement the cell under the pointer
//! [  jump past the matching ] if the cell is zero
//! ]  jump back past the matching [ if the cell is non-zero
//! ,  read one input byte into the cell
//! .  write the cell as one output byte
//! ```
//! Every other byte is commentary and classifies as [`Kind::Noop`].

use crate::error::DecodeError;

/// The operation category of an instruction.
///
/// The discriminants are stable: they are the tag byte of the binary
/// encoding. The six count-bearing and bracket kinds sit next to their
/// counterpart, so `tag ^ 1` maps each of them to its inverse.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `>`
    IncPtr = 0,
    /// `<`
    DecPtr = 1,
    /// `+`
    IncVal = 2,
    /// `-`
    DecVal = 3,
    /// `[`
    LoopStart = 4,
    /// `]`
    LoopEnd = 5,
    /// `,`
    Read = 6,
    /// `.`
    Write = 7,
    /// Any non-command byte.
    Noop = 8,
}

/// All kinds, in discriminant order.
pub const ALL_KINDS: [Kind; 9] = [
    Kind::IncPtr,
    Kind::DecPtr,
    Kind::IncVal,
    Kind::DecVal,
    Kind::LoopStart,
    Kind::LoopEnd,
    Kind::Read,
    Kind::Write,
    Kind::Noop,
];

/// Byte → kind lookup table, built at compile time.
pub static COMMAND_TABLE: [Kind; 256] = build_command_table();

const fn build_command_table() -> [Kind; 256] {
    let mut table = [Kind::Noop; 256];
    table[b'>' as usize] = Kind::IncPtr;
    table[b'<' as usize] = Kind::DecPtr;
    table[b'+' as usize] = Kind::IncVal;
    table[b'-' as usize] = Kind::DecVal;
    table[b'[' as usize] = Kind::LoopStart;
    table[b']' as usize] = Kind::LoopEnd;
    table[b',' as usize] = Kind::Read;
    table[b'.' as usize] = Kind::Write;
    table
}

/// Classify one source byte. Total: every byte maps to some kind.
#[inline]
pub fn classify(byte: u8) -> Kind {
    COMMAND_TABLE[byte as usize]
}

impl Kind {
    /// The inverse operation. `Read`, `Write` and `Noop` are their own
    /// counterpart.
    pub const fn counterpart(self) -> Kind {
        match self {
            Kind::IncPtr => Kind::DecPtr,
            Kind::DecPtr => Kind::IncPtr,
            Kind::IncVal => Kind::DecVal,
            Kind::DecVal => Kind::IncVal,
            Kind::LoopStart => Kind::LoopEnd,
            Kind::LoopEnd => Kind::LoopStart,
            Kind::Read | Kind::Write | Kind::Noop => self,
        }
    }

    /// True for the four kinds that carry a signed repeat count.
    pub const fn is_count_bearing(self) -> bool {
        matches!(
            self,
            Kind::IncPtr | Kind::DecPtr | Kind::IncVal | Kind::DecVal
        )
    }

    /// True for `[` and `]`.
    pub const fn is_bracket(self) -> bool {
        matches!(self, Kind::LoopStart | Kind::LoopEnd)
    }

    /// Whether consecutive source occurrences may be merged by the parser.
    ///
    /// Brackets and I/O are individually addressable events and never merge.
    pub const fn accumulates(self) -> bool {
        self.is_count_bearing() || matches!(self, Kind::Noop)
    }

    /// The source symbol for this kind, or `None` for `Noop`.
    pub const fn symbol(self) -> Option<u8> {
        match self {
            Kind::IncPtr => Some(b'>'),
            Kind::DecPtr => Some(b'<'),
            Kind::IncVal => Some(b'+'),
            Kind::DecVal => Some(b'-'),
            Kind::LoopStart => Some(b'['),
            Kind::LoopEnd => Some(b']'),
            Kind::Read => Some(b','),
            Kind::Write => Some(b'.'),
            Kind::Noop => None,
        }
    }

    /// Upper-case name used in instruction listings.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Kind::IncPtr => "INC_PTR",
            Kind::DecPtr => "DEC_PTR",
            Kind::IncVal => "INC_VAL",
            Kind::DecVal => "DEC_VAL",
            Kind::LoopStart => "LOOP_START",
            Kind::LoopEnd => "LOOP_END",
            Kind::Read => "READ",
            Kind::Write => "WRITE",
            Kind::Noop => "NOOP",
        }
    }
}

impl TryFrom<u8> for Kind {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        ALL_KINDS
            .get(tag as usize)
            .copied()
            .ok_or(DecodeError::InvalidKind(tag))
    }
}
