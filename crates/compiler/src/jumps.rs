//! Bracket matching: links every `[` to its `]` and back, by index.
//!
//! Run once after parsing and again after optimization, since removing
//! instructions shifts every index after the removal point.

use crate::error::CompileError;
use bfvm_common::Instruction;

/// Resolve the jump targets of every bracket in `instructions`.
///
/// `stack` is scratch space; it is cleared on entry so one allocation can
/// serve many resolutions. On success every `LoopStart` holds the index of
/// its `LoopEnd` and vice versa.
pub fn resolve_jumps(
    instructions: &mut [Instruction],
    stack: &mut Vec<u32>,
) -> Result<(), CompileError> {
    if u32::try_from(instructions.len()).is_err() {
        return Err(CompileError::ProgramOversized {
            count: instructions.len(),
        });
    }

    stack.clear();
    for i in 0..instructions.len() {
        // Fits: the length check above bounds every index.
        let idx = i as u32;
        match instructions[i] {
            Instruction::LoopStart(_) => stack.push(idx),
            Instruction::LoopEnd(_) => {
                let open = stack
                    .pop()
                    .ok_or(CompileError::MismatchedBracket { at: i })?;
                instructions[i].set_target(open);
                instructions[open as usize].set_target(idx);
            }
            _ => {}
        }
    }

    match stack.last() {
        Some(&open) => Err(CompileError::MismatchedBracket { at: open as usize }),
        None => Ok(()),
    }
}
