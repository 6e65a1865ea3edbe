//! CLI command implementations.
//!
//! Each command returns the process exit code on failure, after printing
//! the error to stderr.

use crate::cli::{CompileArgs, DisassembleArgs, ExecArgs, MachineArgs, Mode, RunArgs, SourceArgs};
use bfvm_common::Program;
use bfvm_compiler::{CompileError, OptLevel};
use bfvm_vm::{interpret_with_limit, Machine, RuntimeError};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

const EXIT_INPUT: i32 = 1;
const EXIT_COMPILE: i32 = 2;
const EXIT_RUNTIME: i32 = 3;

/// Compile and execute a program.
pub fn run(args: &RunArgs) -> Result<(), i32> {
    let source = load_source(&args.source)?;
    let mut tape = vec![0u8; args.machine.tape_size];
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let result = match args.mode {
        Mode::Interpret => {
            info!(tape_size = tape.len(), "interpreting source");
            interpret_with_limit(&source, &mut tape, stdin, stdout, args.machine.max_steps)
        }
        Mode::Unoptimized | Mode::Optimized => {
            let level = if args.mode == Mode::Optimized {
                OptLevel::Optimized
            } else {
                OptLevel::Unoptimized
            };
            let program = compile_source(&source, level)?;
            execute(&program, &mut tape, &args.machine, stdin, stdout)
        }
    };
    result.map_err(report_runtime)
}

/// Compile a program and write its binary encoding, or print a listing.
pub fn compile(args: &CompileArgs) -> Result<(), i32> {
    let source = load_source(&args.source)?;
    let program = compile_source(&source, level_for(args.no_optimize))?;

    if args.listing {
        print!("{}", bfvm_compiler::listing(&program));
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.source));
    let bytes = program.encode();

    fs::write(&output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        EXIT_INPUT
    })?;

    eprintln!(
        "compiled {} instructions ({} bytes) -> {}",
        program.len(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

/// Decode and execute a binary program.
pub fn exec(args: &ExecArgs) -> Result<(), i32> {
    let bytes = fs::read(&args.file).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", args.file.display());
        EXIT_INPUT
    })?;

    let mut program = Program::decode(&bytes).map_err(|e| {
        eprintln!("error: decode: {e}");
        EXIT_INPUT
    })?;

    // Stored targets are not trusted; the links are rebuilt from the brackets.
    let mut stack = Vec::new();
    bfvm_compiler::resolve_jumps(&mut program.instructions, &mut stack)
        .map_err(report_compile)?;
    debug!(instructions = program.len(), "decoded program");

    let mut tape = vec![0u8; args.machine.tape_size];
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    execute(&program, &mut tape, &args.machine, stdin, stdout).map_err(report_runtime)
}

/// Print the symbol form of a compiled program.
pub fn disassemble(args: &DisassembleArgs) -> Result<(), i32> {
    let source = load_source(&args.source)?;
    let program = compile_source(&source, level_for(args.no_optimize))?;
    println!("{}", bfvm_compiler::disassemble(&program));
    Ok(())
}

// ---- Helpers ----

fn execute<R: io::Read, W: Write>(
    program: &Program,
    tape: &mut [u8],
    machine: &MachineArgs,
    input: R,
    output: W,
) -> Result<(), RuntimeError> {
    info!(
        instructions = program.len(),
        tape_size = tape.len(),
        max_steps = ?machine.max_steps,
        "executing"
    );
    let mut vm = Machine::new(program, tape, input, output).with_step_limit(machine.max_steps);
    let result = vm.run();
    debug!(steps = vm.steps(), "run finished");
    result
}

fn load_source(args: &SourceArgs) -> Result<Vec<u8>, i32> {
    if let Some(text) = &args.eval {
        return Ok(text.clone().into_bytes());
    }
    let Some(path) = &args.file else {
        eprintln!("error: no program given");
        return Err(EXIT_INPUT);
    };
    fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        EXIT_INPUT
    })
}

fn compile_source(source: &[u8], level: OptLevel) -> Result<Program, i32> {
    let program = bfvm_compiler::compile(source, level).map_err(report_compile)?;
    debug!(instructions = program.len(), ?level, "compiled");
    Ok(program)
}

fn level_for(no_optimize: bool) -> OptLevel {
    if no_optimize {
        OptLevel::Unoptimized
    } else {
        OptLevel::Optimized
    }
}

fn default_output(source: &SourceArgs) -> PathBuf {
    match &source.file {
        Some(path) => path.with_extension("bfb"),
        None => PathBuf::from("out.bfb"),
    }
}

fn report_compile(e: CompileError) -> i32 {
    eprintln!("error: {e}");
    EXIT_COMPILE
}

fn report_runtime(e: RuntimeError) -> i32 {
    eprintln!("runtime error: {e}");
    EXIT_RUNTIME
}
