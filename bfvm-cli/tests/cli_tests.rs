//! Integration tests for the bfvm CLI.
//!
//! These tests invoke the `bfvm` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn bfvm() -> Command {
    let mut cmd = Command::cargo_bin("bfvm").unwrap();
    cmd.env_remove("BFVM_TAPE_SIZE")
        .env_remove("BFVM_MAX_STEPS")
        .env_remove("RUST_LOG");
    cmd
}

/// Return the workspace root (parent of bfvm-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a test program file.
fn test_program(name: &str) -> PathBuf {
    workspace_root().join("tests/programs").join(name)
}

/// Helper: compile program text, returning the path to the .bfb output.
fn compile_to_temp(dir: &TempDir, source: &str) -> PathBuf {
    let input = dir.path().join("prog.bf");
    let output = dir.path().join("prog.bfb");
    fs::write(&input, source).unwrap();
    bfvm()
        .args([
            "compile",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();
    output
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    bfvm()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: bfvm"));
}

#[test]
fn help_flag_exits_0() {
    bfvm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    bfvm().arg("frobnicate").assert().failure().code(1);
}

// ---- Run ----

#[test]
fn run_hello_world_file() {
    bfvm()
        .args(["run", test_program("hello.bf").to_str().unwrap()])
        .assert()
        .success()
        .stdout("Hello World!\n");
}

#[test]
fn run_hello_world_every_mode() {
    for mode in ["interpret", "unoptimized", "optimized"] {
        bfvm()
            .args(["run", "--mode", mode, test_program("hello.bf").to_str().unwrap()])
            .assert()
            .success()
            .stdout("Hello World!\n");
    }
}

#[test]
fn run_inline_program() {
    bfvm()
        .args(["run", "-e", &format!("{}.+.", "+".repeat(65))])
        .assert()
        .success()
        .stdout("AB");
}

#[test]
fn run_echoes_stdin() {
    bfvm()
        .args(["run", test_program("cat.bf").to_str().unwrap()])
        .write_stdin("echo me")
        .assert()
        .success()
        .stdout("echo me");
}

#[test]
fn run_missing_file_exits_1() {
    bfvm()
        .args(["run", "/nonexistent/prog.bf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_unbalanced_exits_2() {
    bfvm()
        .args(["run", "-e", "+[-"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("mismatched bracket"));
}

#[test]
fn run_out_of_bounds_exits_3() {
    bfvm()
        .args(["run", "--tape-size", "1", "-e", "+[>]"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("outside tape of length 1"));
}

#[test]
fn run_output_before_failure_is_flushed() {
    bfvm()
        .args(["run", "--tape-size", "2", "-e", "+.>+.>+."])
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::eq(&[1u8, 1][..]));
}

#[test]
fn run_step_limit_exits_3() {
    bfvm()
        .args(["run", "--max-steps", "100", "-e", "+[]"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("step limit 100"));
}

#[test]
fn tape_size_from_environment() {
    bfvm()
        .env("BFVM_TAPE_SIZE", "1")
        .args(["run", "-e", ">+"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn zero_tape_size_is_a_usage_error() {
    bfvm()
        .args(["run", "--tape-size", "0", "-e", "+"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn interpret_mode_reports_unmatched_bracket() {
    bfvm()
        .args(["run", "--mode", "interpret", "-e", "+]"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unmatched bracket"));
}

// ---- Compile / exec ----

#[test]
fn compile_then_exec() {
    let dir = TempDir::new().unwrap();
    let bfb = compile_to_temp(&dir, &fs::read_to_string(test_program("hello.bf")).unwrap());
    let bytes = fs::read(&bfb).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(bytes.len() % 8, 0);

    bfvm()
        .args(["exec", bfb.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Hello World!\n");
}

#[test]
fn compile_defaults_output_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("three.bf");
    fs::write(&input, "+++").unwrap();
    bfvm()
        .args(["compile", input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("compiled 1 instructions (8 bytes)"));
    assert_eq!(
        fs::read(dir.path().join("three.bfb")).unwrap(),
        vec![2, 0, 0, 0, 3, 0, 0, 0]
    );
}

#[test]
fn compile_listing_to_stdout() {
    bfvm()
        .args(["compile", "--listing", "-e", "+[-]."])
        .assert()
        .success()
        .stdout("0000 INC_VAL 1\n0001 LOOP_START 3\n0002 DEC_VAL 1\n0003 LOOP_END 1\n0004 WRITE\n");
}

#[test]
fn compile_without_optimization_keeps_cancelling_runs() {
    bfvm()
        .args(["compile", "--listing", "--no-optimize", "-e", "+-"])
        .assert()
        .success()
        .stdout("0000 INC_VAL 1\n0001 DEC_VAL 1\n");
}

#[test]
fn exec_rejects_truncated_binary() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.bfb");
    fs::write(&bad, [2u8, 0, 0]).unwrap();
    bfvm()
        .args(["exec", bad.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("decode"));
}

#[test]
fn exec_rejects_unbalanced_binary() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("open.bfb");
    // A lone LOOP_START.
    fs::write(&bad, [4u8, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    bfvm()
        .args(["exec", bad.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
}

// ---- Disassemble ----

#[test]
fn disassemble_optimized() {
    bfvm()
        .args(["disassemble", "-e", "+++--- >>> <<<< [-] ."])
        .assert()
        .success()
        .stdout("<[-].\n");
}

#[test]
fn disassemble_unoptimized() {
    bfvm()
        .args(["disassemble", "--no-optimize", "-e", "a+b-c"])
        .assert()
        .success()
        .stdout("+-\n");
}
