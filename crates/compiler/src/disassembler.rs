//! Disassembler: instruction stream → text.
//!
//! Two renderings. [`disassemble`] expands the stream back into the
//! eight-symbol source form. [`listing`] prints one instruction per line
//! with its index, mnemonic and payload.

use bfvm_common::{Instruction, Program};
use std::fmt::Write;

/// Render a program back into command symbols.
///
/// Each arithmetic instruction expands to `count` copies of its symbol, or
/// `-count` copies of its counterpart's symbol when the count is negative.
/// `Noop` renders as nothing.
pub fn disassemble(program: &Program) -> String {
    let mut out = String::with_capacity(program.len());

    for instr in &program.instructions {
        let kind = instr.kind();
        match instr.count() {
            Some(n) => {
                let kind = if n < 0 { kind.counterpart() } else { kind };
                if let Some(sym) = kind.symbol() {
                    out.extend(std::iter::repeat(sym as char).take(n.unsigned_abs() as usize));
                }
            }
            None => {
                if let Some(sym) = kind.symbol() {
                    out.push(sym as char);
                }
            }
        }
    }

    out
}

/// Render a program as a numbered instruction listing.
///
/// ```text
/// 0000 INC_VAL 2
/// 0001 LOOP_START 3
/// 0002 DEC_VAL 1
/// 0003 LOOP_END 1
/// ```
pub fn listing(program: &Program) -> String {
    let mut out = String::new();

    for (idx, instr) in program.instructions.iter().enumerate() {
        let mnemonic = instr.kind().mnemonic();
        // Writing to a String cannot fail.
        let _ = match instr {
            Instruction::IncPtr(n)
            | Instruction::DecPtr(n)
            | Instruction::IncVal(n)
            | Instruction::DecVal(n) => writeln!(out, "{idx:04} {mnemonic} {n}"),
            Instruction::LoopStart(t) | Instruction::LoopEnd(t) => {
                writeln!(out, "{idx:04} {mnemonic} {t}")
            }
            Instruction::Read | Instruction::Write | Instruction::Noop => {
                writeln!(out, "{idx:04} {mnemonic}")
            }
        };
    }

    out
}
