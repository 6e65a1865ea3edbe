//! bfvm CLI: compile, disassemble and execute tape-machine programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input or decode error
//! - 2: Compile error (mismatched bracket, oversized program)
//! - 3: Runtime error

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; anything else is a
            // usage error. `e.exit()` would use 2, which is the compile-error code.
            let code = if e.use_stderr() { 1 } else { 0 };
            // A closed stdout/stderr leaves nothing to report to.
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Compile(args) => commands::compile(args),
        Command::Exec(args) => commands::exec(args),
        Command::Disassemble(args) => commands::disassemble(args),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
