//! Machine state: program counter, data pointer, borrowed tape, I/O.

use crate::error::RuntimeError;
use bfvm_common::Program;
use std::io::{self, Read, Write};

/// Tape length conventionally used by programs in this language.
pub const DEFAULT_TAPE_LEN: usize = 30_000;

/// The bytecode virtual machine.
///
/// Borrows a compiled program and a caller-owned tape for the duration of
/// a run. The tape is never resized or cleared by the machine.
pub struct Machine<'a, R, W> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// The memory tape.
    pub(crate) tape: &'a mut [u8],
    pub(crate) input: R,
    pub(crate) output: W,
    /// Program counter (instruction index).
    pub(crate) pc: usize,
    /// Data pointer (tape index). May hold an out-of-range value between
    /// pointer moves; only accesses are checked.
    pub(crate) ptr: usize,
    /// Instructions dispatched in the last run.
    pub(crate) steps: u64,
    /// Abort a run after this many steps. `None` runs to completion.
    pub(crate) step_limit: Option<u64>,
}

impl<'a, R: Read, W: Write> Machine<'a, R, W> {
    /// Create a machine for `program` over `tape`.
    pub fn new(program: &'a Program, tape: &'a mut [u8], input: R, output: W) -> Self {
        Self {
            program,
            tape,
            input,
            output,
            pc: 0,
            ptr: 0,
            steps: 0,
            step_limit: None,
        }
    }

    /// Abort runs with [`RuntimeError::StepLimitExceeded`] after `limit`
    /// dispatched instructions.
    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Current data pointer.
    pub fn pointer(&self) -> usize {
        self.ptr
    }

    /// Current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Number of instructions dispatched by the last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Consume the machine and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// The data pointer, if it addresses a tape cell.
    pub(crate) fn checked_ptr(&self) -> Result<usize, RuntimeError> {
        check_bounds(self.ptr, self.tape.len(), self.pc)
    }

    /// The cell under the data pointer.
    pub(crate) fn cell(&mut self) -> Result<&mut u8, RuntimeError> {
        let idx = self.checked_ptr()?;
        Ok(&mut self.tape[idx])
    }
}

/// Charge one step against `limit`.
pub(crate) fn charge_step(
    steps: &mut u64,
    limit: Option<u64>,
    at: usize,
) -> Result<(), RuntimeError> {
    if let Some(limit) = limit {
        if *steps >= limit {
            return Err(RuntimeError::StepLimitExceeded { at, limit });
        }
    }
    *steps += 1;
    Ok(())
}

pub(crate) fn check_bounds(ptr: usize, len: usize, at: usize) -> Result<usize, RuntimeError> {
    if ptr < len {
        Ok(ptr)
    } else {
        Err(RuntimeError::OutOfBounds {
            at,
            pointer: ptr,
            len,
        })
    }
}

/// Push pending output to the sink before blocking on input, so a prompt
/// is visible by the time the program waits for its answer.
pub(crate) fn flush_output<W: Write>(output: &mut W, at: usize) -> Result<(), RuntimeError> {
    output.flush().map_err(|e| RuntimeError::io(at, &e))
}

/// Read one byte. `Ok(None)` at end of input.
pub(crate) fn read_byte<R: Read>(
    input: &mut R,
    at: usize,
) -> Result<Option<u8>, RuntimeError> {
    let mut buf = [0u8];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(RuntimeError::io(at, &e)),
        }
    }
}

pub(crate) fn write_byte<W: Write>(
    output: &mut W,
    byte: u8,
    at: usize,
) -> Result<(), RuntimeError> {
    output
        .write_all(&[byte])
        .map_err(|e| RuntimeError::io(at, &e))
}
