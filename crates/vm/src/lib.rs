//! bfvm virtual machine: executes compiled instruction streams.
//!
//! The machine has:
//! - A program counter into the instruction stream
//! - A data pointer into a caller-owned, fixed-length byte tape
//! - An input source and output sink for `,` and `.`
//!
//! Pointer moves are unchecked; every value access, I/O and bracket test
//! checks the pointer against the tape and fails with
//! [`RuntimeError::OutOfBounds`] rather than touching memory outside it.
//!
//! # Usage
//!
//! ```
//! use bfvm_common::{Instruction, Program};
//! use bfvm_vm::run;
//!
//! let program = Program::new(vec![Instruction::IncVal(72), Instruction::Write]);
//! let mut tape = [0u8; 8];
//! let mut out = Vec::new();
//! run(&program, &mut tape, std::io::empty(), &mut out).unwrap();
//! assert_eq!(out, b"H");
//! ```

pub mod error;
pub mod execute;
pub mod interpreter;
pub mod machine;

pub use error::RuntimeError;
pub use interpreter::{interpret, interpret_with_limit};
pub use machine::{Machine, DEFAULT_TAPE_LEN};

use bfvm_common::Program;
use std::io::{Read, Write};

/// Execute a program over `tape`.
///
/// This is the primary entry point for the VM. The tape is used as given:
/// callers zero it between runs if they want a fresh machine.
///
/// # Errors
///
/// Returns [`RuntimeError`] on the first out-of-bounds access or I/O
/// failure. Output written before the failure is flushed.
pub fn run<R: Read, W: Write>(
    program: &Program,
    tape: &mut [u8],
    input: R,
    output: W,
) -> Result<(), RuntimeError> {
    let mut vm = Machine::new(program, tape, input, output);
    vm.run()
}
