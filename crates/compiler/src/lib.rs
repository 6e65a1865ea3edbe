//! bfvm compiler: program text to instruction stream.
//!
//! The pipeline has three stages:
//!
//! 1. **Parse**: classify every byte and run-length encode the arithmetic
//!    symbols ([`parse_append`]).
//! 2. **Optimize**: one peephole pass that folds repeats, cancels inverse
//!    pairs and strips inert instructions ([`optimize`]).
//! 3. **Resolve**: link every `[` to its `]` by index ([`resolve_jumps`]);
//!    run after parsing and again after optimizing.
//!
//! # Usage
//!
//! ```
//! use bfvm_common::Instruction;
//! use bfvm_compiler::{compile, disassemble, OptLevel};
//!
//! let program = compile(b"+++ add three then +-+- nothing", OptLevel::Optimized).unwrap();
//! assert_eq!(program.instructions, vec![Instruction::IncVal(3)]);
//! assert_eq!(disassemble(&program), "+++");
//! ```

pub mod error;

mod disassembler;
mod jumps;
mod optimizer;
mod parser;

pub use disassembler::{disassemble, listing};
pub use error::CompileError;
pub use jumps::resolve_jumps;
pub use optimizer::optimize;
pub use parser::parse_append;

use bfvm_common::Program;
use tracing::{debug, instrument};

/// How far to take the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptLevel {
    /// Parse and resolve only.
    Unoptimized,
    /// Parse, resolve, optimize, resolve.
    #[default]
    Optimized,
}

/// Compile program text into a fresh instruction stream.
#[instrument(level = "debug", skip_all, fields(source_len = source.len(), opt = ?level))]
pub fn compile(source: &[u8], level: OptLevel) -> Result<Program, CompileError> {
    let mut program = Program::default();
    compile_into(&mut program, source, level)?;
    Ok(program)
}

/// Compile program text into `program`, clearing it first.
///
/// Lets a caller reuse one stream allocation across many runs.
pub fn compile_into(
    program: &mut Program,
    source: &[u8],
    level: OptLevel,
) -> Result<(), CompileError> {
    program.clear();
    parse_append(program, source)?;
    debug!(instructions = program.len(), "parsed");

    if level == OptLevel::Optimized {
        optimize(program)?;
    }
    Ok(())
}
