//! Direct-execution reference interpreter.
//!
//! Executes raw program text without parsing: every step classifies the
//! byte under the cursor, and taken brackets scan the source for their
//! partner. Slow, but independent of the compiler, which makes it the
//! baseline the compiled path is checked against.

use crate::error::RuntimeError;
use crate::machine::{charge_step, check_bounds, flush_output, read_byte, write_byte};
use bfvm_common::{classify, Kind};
use std::io::{Read, Write};
use tracing::debug;

/// Interpret `source` directly over `tape`.
///
/// Bounds convention matches the bytecode machine: pointer moves are
/// unchecked, value access, I/O and bracket tests are checked. Error
/// positions are source byte offsets.
pub fn interpret<R: Read, W: Write>(
    source: &[u8],
    tape: &mut [u8],
    input: R,
    output: W,
) -> Result<(), RuntimeError> {
    interpret_with_limit(source, tape, input, output, None)
}

/// [`interpret`], aborting after `step_limit` executed source bytes.
///
/// Commentary bytes count as steps.
pub fn interpret_with_limit<R: Read, W: Write>(
    source: &[u8],
    tape: &mut [u8],
    mut input: R,
    mut output: W,
    step_limit: Option<u64>,
) -> Result<(), RuntimeError> {
    debug!(source_len = source.len(), tape_len = tape.len(), "interpret start");
    let result = interpret_loop(source, tape, &mut input, &mut output, step_limit);
    let flushed = output
        .flush()
        .map_err(|e| RuntimeError::io(source.len(), &e));
    result.and(flushed)
}

fn interpret_loop<R: Read, W: Write>(
    source: &[u8],
    tape: &mut [u8],
    input: &mut R,
    output: &mut W,
    step_limit: Option<u64>,
) -> Result<(), RuntimeError> {
    let len = tape.len();
    let mut pc = 0usize;
    let mut ptr = 0usize;
    let mut steps = 0u64;

    while pc < source.len() {
        charge_step(&mut steps, step_limit, pc)?;
        pc = match classify(source[pc]) {
            Kind::IncPtr => {
                ptr = ptr.wrapping_add(1);
                pc + 1
            }
            Kind::DecPtr => {
                ptr = ptr.wrapping_sub(1);
                pc + 1
            }
            Kind::IncVal => {
                let idx = check_bounds(ptr, len, pc)?;
                tape[idx] = tape[idx].wrapping_add(1);
                pc + 1
            }
            Kind::DecVal => {
                let idx = check_bounds(ptr, len, pc)?;
                tape[idx] = tape[idx].wrapping_sub(1);
                pc + 1
            }
            Kind::LoopStart => {
                let idx = check_bounds(ptr, len, pc)?;
                if tape[idx] != 0 {
                    pc + 1
                } else {
                    scan_forward(source, pc)? + 1
                }
            }
            Kind::LoopEnd => {
                let idx = check_bounds(ptr, len, pc)?;
                if tape[idx] != 0 {
                    scan_backward(source, pc)? + 1
                } else {
                    pc + 1
                }
            }
            Kind::Read => {
                let idx = check_bounds(ptr, len, pc)?;
                flush_output(output, pc)?;
                if let Some(byte) = read_byte(input, pc)? {
                    tape[idx] = byte;
                }
                pc + 1
            }
            Kind::Write => {
                let idx = check_bounds(ptr, len, pc)?;
                write_byte(output, tape[idx], pc)?;
                pc + 1
            }
            Kind::Noop => pc + 1,
        };
    }
    Ok(())
}

/// Offset of the `]` matching the `[` at `open`.
fn scan_forward(source: &[u8], open: usize) -> Result<usize, RuntimeError> {
    let mut depth = 1usize;
    for (offset, &byte) in source.iter().enumerate().skip(open + 1) {
        match classify(byte) {
            Kind::LoopStart => depth += 1,
            Kind::LoopEnd => {
                depth -= 1;
                if depth == 0 {
                    return Ok(offset);
                }
            }
            _ => {}
        }
    }
    Err(RuntimeError::UnmatchedBracket { at: open })
}

/// Offset of the `[` matching the `]` at `close`.
fn scan_backward(source: &[u8], close: usize) -> Result<usize, RuntimeError> {
    let mut depth = 1usize;
    for offset in (0..close).rev() {
        match classify(source[offset]) {
            Kind::LoopEnd => depth += 1,
            Kind::LoopStart => {
                depth -= 1;
                if depth == 0 {
                    return Ok(offset);
                }
            }
            _ => {}
        }
    }
    Err(RuntimeError::UnmatchedBracket { at: close })
}
