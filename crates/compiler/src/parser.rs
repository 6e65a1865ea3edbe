//! Run-length parser: program text → instruction stream.
//!
//! Consecutive occurrences of an arithmetic symbol collapse into one
//! instruction carrying the repeat count. Runs of commentary collapse into
//! one `Noop`. Brackets and I/O never merge: each occurrence is its own
//! control-flow or side-effecting event.

use crate::error::CompileError;
use crate::jumps::resolve_jumps;
use bfvm_common::{classify, Instruction, Kind, Program};

/// Parse `source` and append the result to `program`, then resolve jumps
/// over the whole stream.
///
/// The appended run starts fresh: it never merges into an instruction
/// already in `program`.
pub fn parse_append(program: &mut Program, source: &[u8]) -> Result<(), CompileError> {
    let instrs = &mut program.instructions;
    let mut kinds = source.iter().map(|&b| classify(b));

    if let Some(first) = kinds.next() {
        let mut current = Instruction::single(first);

        for kind in kinds {
            if !extend(&mut current, kind) {
                instrs.push(current);
                current = Instruction::single(kind);
            }
        }
        instrs.push(current);
    }

    if u32::try_from(instrs.len()).is_err() {
        return Err(CompileError::ProgramOversized { count: instrs.len() });
    }

    let mut stack = Vec::new();
    resolve_jumps(instrs, &mut stack)
}

/// Fold one more occurrence of `kind` into `current`.
///
/// Returns false when `kind` must start a new instruction: a different
/// kind, a kind that never merges, or a count already at `i32::MAX`.
fn extend(current: &mut Instruction, kind: Kind) -> bool {
    if kind != current.kind() || !kind.accumulates() {
        return false;
    }
    match current.count_mut() {
        Some(n) if *n < i32::MAX => {
            *n += 1;
            true
        }
        Some(_) => false,
        // Commentary carries no count.
        None => true,
    }
}
