//! Peephole optimizer: a single adjacent-pair merge/cancel pass.
//!
//! The pass is a left fold over the parsed stream. The last instruction of
//! the output is the "kept" instruction; each input instruction is a
//! "candidate" compared against it:
//!
//! | kept            | candidate            | action                         |
//! |-----------------|----------------------|--------------------------------|
//! | arithmetic `k`  | same `k`             | add counts into kept           |
//! | arithmetic `k`  | counterpart of `k`   | subtract count from kept       |
//! | `Noop`          | `Noop`               | drop candidate                 |
//! | anything        | `Noop`               | drop candidate                 |
//! | `Noop`          | anything else        | candidate replaces kept        |
//! | anything else   | anything else        | candidate becomes the new kept |
//!
//! Afterwards every `Noop` and every zero-count arithmetic instruction is
//! removed and jumps are resolved again.
//!
//! One pass does not reach a fixed point: `+><-` leaves `+` and `-`
//! apart because the cancelled `><` between them is only removed after the
//! fold. The result is still equivalent, just not minimal.

use crate::error::CompileError;
use crate::jumps::resolve_jumps;
use bfvm_common::{Instruction, Kind, Program};
use tracing::{debug, instrument};

/// What the fold does with a candidate, given the kept instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Add the candidate's count to the kept count.
    Add,
    /// Subtract the candidate's count from the kept count.
    Subtract,
    /// Discard the candidate.
    Drop,
    /// Overwrite the kept instruction with the candidate.
    Replace,
    /// Keep both; the candidate becomes the new kept instruction.
    Advance,
}

pub(crate) fn decide(kept: Kind, candidate: Kind) -> Action {
    if kept == candidate {
        if kept.is_count_bearing() {
            Action::Add
        } else if kept == Kind::Noop {
            Action::Drop
        } else {
            Action::Advance
        }
    } else if candidate == kept.counterpart() {
        // Brackets are counterparts too, but they are not accumulators.
        if kept.is_count_bearing() {
            Action::Subtract
        } else {
            Action::Advance
        }
    } else if candidate == Kind::Noop {
        Action::Drop
    } else if kept == Kind::Noop {
        Action::Replace
    } else {
        Action::Advance
    }
}

fn step(mut out: Vec<Instruction>, candidate: Instruction) -> Vec<Instruction> {
    let Some(kept) = out.last_mut() else {
        out.push(candidate);
        return out;
    };

    let folded = match decide(kept.kind(), candidate.kind()) {
        Action::Add => fold_count(kept, candidate, i32::checked_add),
        Action::Subtract => fold_count(kept, candidate, i32::checked_sub),
        Action::Drop => true,
        Action::Replace => {
            *kept = candidate;
            true
        }
        Action::Advance => false,
    };

    if !folded {
        out.push(candidate);
    }
    out
}

/// Combine the candidate's count into `kept`. Returns false, leaving `kept`
/// untouched, if the result would not fit in an `i32`.
fn fold_count(
    kept: &mut Instruction,
    candidate: Instruction,
    op: fn(i32, i32) -> Option<i32>,
) -> bool {
    match (kept.count_mut(), candidate.count()) {
        (Some(acc), Some(n)) => match op(*acc, n) {
            Some(sum) => {
                *acc = sum;
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Optimize `program` in place and re-resolve its jumps.
///
/// The input must be a balanced stream (as produced by the parser). A
/// resolution failure afterwards is reported as
/// [`CompileError::Inconsistent`].
#[instrument(level = "debug", skip_all, fields(before = program.len()))]
pub fn optimize(program: &mut Program) -> Result<(), CompileError> {
    let input = std::mem::take(&mut program.instructions);
    let capacity = input.len();

    let mut folded = input
        .into_iter()
        .fold(Vec::with_capacity(capacity), step);
    folded.retain(|instr| !instr.is_inert());
    program.instructions = folded;

    debug!(after = program.len(), "peephole pass complete");

    let mut stack = Vec::new();
    resolve_jumps(&mut program.instructions, &mut stack).map_err(|e| match e {
        CompileError::MismatchedBracket { at } => CompileError::Inconsistent { at },
        other => other,
    })
}
