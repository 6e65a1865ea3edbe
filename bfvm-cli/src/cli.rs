//! Command-line arguments.

use bfvm_vm::DEFAULT_TAPE_LEN;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bfvm", version)]
#[command(about = "Compile and run programs for the eight-command tape machine")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile and execute a program
    Run(RunArgs),
    /// Compile a program to its binary encoding
    Compile(CompileArgs),
    /// Execute a binary-encoded program
    Exec(ExecArgs),
    /// Print the symbol form of a compiled program
    Disassemble(DisassembleArgs),
}

/// Where program text comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Program source file
    pub file: Option<PathBuf>,

    /// Program text given inline
    #[arg(short, long, value_name = "TEXT")]
    pub eval: Option<String>,
}

#[derive(Args, Debug)]
pub struct MachineArgs {
    /// Number of tape cells
    #[arg(
        long,
        env = "BFVM_TAPE_SIZE",
        default_value_t = DEFAULT_TAPE_LEN,
        value_parser = parse_tape_size
    )]
    pub tape_size: usize,

    /// Abort after this many executed steps
    #[arg(long, env = "BFVM_MAX_STEPS")]
    pub max_steps: Option<u64>,
}

/// How `run` executes the program.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Execute the source text directly
    Interpret,
    /// Execute the parsed stream without peephole optimization
    Unoptimized,
    /// Execute the optimized stream
    #[default]
    Optimized,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub machine: MachineArgs,

    #[arg(long, value_enum, default_value_t = Mode::Optimized)]
    pub mode: Mode,
}

#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output path (defaults to the input path with a .bfb extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip peephole optimization
    #[arg(long)]
    pub no_optimize: bool,

    /// Print an instruction listing to stdout instead of writing a file
    #[arg(long)]
    pub listing: bool,
}

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Binary program (.bfb)
    pub file: PathBuf,

    #[command(flatten)]
    pub machine: MachineArgs,
}

#[derive(Args, Debug)]
pub struct DisassembleArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Skip peephole optimization
    #[arg(long)]
    pub no_optimize: bool,
}

fn parse_tape_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if size == 0 {
        return Err("tape size must be at least 1".to_string());
    }
    Ok(size)
}
