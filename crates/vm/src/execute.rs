//! Main execution loop and instruction dispatch.

use crate::error::RuntimeError;
use crate::machine::{charge_step, flush_output, read_byte, write_byte, Machine};
use bfvm_common::Instruction;
use std::io::{Read, Write};
use tracing::{debug, trace};

impl<'a, R: Read, W: Write> Machine<'a, R, W> {
    /// Run the program from the start until the program counter passes the
    /// last instruction, or until the first error.
    ///
    /// Resets the program counter and data pointer but not the tape. Output
    /// is flushed before returning, whether or not the run succeeded.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.pc = 0;
        self.ptr = 0;
        self.steps = 0;
        debug!(
            instructions = self.program.len(),
            tape_len = self.tape.len(),
            "run start"
        );

        let result = self.dispatch_loop();
        let flushed = self
            .output
            .flush()
            .map_err(|e| RuntimeError::io(self.pc, &e));

        debug!(steps = self.steps, pc = self.pc, ok = result.is_ok(), "run end");
        result.and(flushed)
    }

    fn dispatch_loop(&mut self) -> Result<(), RuntimeError> {
        let program = self.program;

        while let Some(&instr) = program.instructions.get(self.pc) {
            charge_step(&mut self.steps, self.step_limit, self.pc)?;
            trace!(pc = self.pc, ptr = self.ptr, ?instr);
            self.pc = self.step(instr)?;
        }
        Ok(())
    }

    /// Execute one instruction and return the next program counter.
    fn step(&mut self, instr: Instruction) -> Result<usize, RuntimeError> {
        let next = self.pc + 1;

        match instr {
            Instruction::IncPtr(n) => {
                self.ptr = self.ptr.wrapping_add_signed(n as isize);
                Ok(next)
            }
            Instruction::DecPtr(n) => {
                self.ptr = self.ptr.wrapping_add_signed(-(n as isize));
                Ok(next)
            }
            Instruction::IncVal(n) => {
                let cell = self.cell()?;
                *cell = cell.wrapping_add(n as u8);
                Ok(next)
            }
            Instruction::DecVal(n) => {
                let cell = self.cell()?;
                *cell = cell.wrapping_sub(n as u8);
                Ok(next)
            }
            // Jump if zero: one past the matching LoopEnd.
            Instruction::LoopStart(target) => {
                if *self.cell()? != 0 {
                    Ok(next)
                } else {
                    Ok(target as usize + 1)
                }
            }
            // Jump if non-zero: one past the matching LoopStart.
            Instruction::LoopEnd(target) => {
                if *self.cell()? != 0 {
                    Ok(target as usize + 1)
                } else {
                    Ok(next)
                }
            }
            Instruction::Read => {
                let idx = self.checked_ptr()?;
                flush_output(&mut self.output, self.pc)?;
                if let Some(byte) = read_byte(&mut self.input, self.pc)? {
                    self.tape[idx] = byte;
                }
                Ok(next)
            }
            Instruction::Write => {
                let idx = self.checked_ptr()?;
                write_byte(&mut self.output, self.tape[idx], self.pc)?;
                Ok(next)
            }
            Instruction::Noop => Ok(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfvm_common::Instruction::*;
    use bfvm_common::Program;

    fn run_with(
        instrs: Vec<Instruction>,
        tape: &mut [u8],
        input: &[u8],
    ) -> (Result<(), RuntimeError>, Vec<u8>) {
        let program = Program::new(instrs);
        let mut vm = Machine::new(&program, tape, input, Vec::new());
        let result = vm.run();
        (result, vm.into_output())
    }

    #[test]
    fn empty_program_halts() {
        let mut tape = [0u8; 1];
        let (result, out) = run_with(vec![], &mut tape, b"");
        assert_eq!(result, Ok(()));
        assert!(out.is_empty());
    }

    #[test]
    fn value_arithmetic_wraps() {
        let mut tape = [250u8; 1];
        let (result, _) = run_with(vec![IncVal(10)], &mut tape, b"");
        assert_eq!(result, Ok(()));
        assert_eq!(tape[0], 4);

        let mut tape = [0u8; 1];
        run_with(vec![DecVal(1)], &mut tape, b"").0.unwrap();
        assert_eq!(tape[0], 255);
    }

    #[test]
    fn negative_counts_invert() {
        let mut tape = [10u8; 3];
        let (result, _) = run_with(
            vec![IncVal(-3), IncPtr(2), DecVal(-1), DecPtr(1), IncVal(1)],
            &mut tape,
            b"",
        );
        assert_eq!(result, Ok(()));
        assert_eq!(tape, [7, 11, 11]);
    }

    #[test]
    fn large_counts_reduce_mod_256() {
        let mut tape = [0u8; 1];
        run_with(vec![IncVal(258)], &mut tape, b"").0.unwrap();
        assert_eq!(tape[0], 2);
    }

    #[test]
    fn pointer_may_leave_tape_without_access() {
        let mut tape = [0u8; 2];
        let (result, _) = run_with(vec![DecPtr(5), IncPtr(6), IncVal(1)], &mut tape, b"");
        assert_eq!(result, Ok(()));
        assert_eq!(tape, [0, 1]);
    }

    #[test]
    fn value_access_past_end_fails() {
        let mut tape = [0u8; 2];
        let (result, _) = run_with(vec![IncPtr(2), IncVal(1)], &mut tape, b"");
        assert_eq!(
            result,
            Err(RuntimeError::OutOfBounds {
                at: 1,
                pointer: 2,
                len: 2
            })
        );
    }

    #[test]
    fn value_access_before_start_fails() {
        let mut tape = [0u8; 2];
        let (result, _) = run_with(vec![DecPtr(1), Write], &mut tape, b"");
        assert!(matches!(
            result,
            Err(RuntimeError::OutOfBounds { at: 1, .. })
        ));
    }

    #[test]
    fn bracket_test_is_bounds_checked() {
        let mut tape = [0u8; 1];
        let (result, _) = run_with(vec![IncPtr(1), LoopStart(2), LoopEnd(1)], &mut tape, b"");
        assert!(matches!(
            result,
            Err(RuntimeError::OutOfBounds { at: 1, .. })
        ));
    }

    #[test]
    fn loop_skipped_when_cell_zero() {
        let mut tape = [0u8; 1];
        let (result, out) = run_with(
            vec![LoopStart(2), Write, LoopEnd(0), IncVal(65), Write],
            &mut tape,
            b"",
        );
        assert_eq!(result, Ok(()));
        assert_eq!(out, b"A");
    }

    #[test]
    fn loop_runs_until_zero() {
        // +++[>++<-]>.
        let mut tape = [0u8; 2];
        let (result, out) = run_with(
            vec![
                IncVal(3),
                LoopStart(6),
                IncPtr(1),
                IncVal(2),
                DecPtr(1),
                DecVal(1),
                LoopEnd(1),
                IncPtr(1),
                Write,
            ],
            &mut tape,
            b"",
        );
        assert_eq!(result, Ok(()));
        assert_eq!(out, vec![6]);
        assert_eq!(tape, [0, 6]);
    }

    #[test]
    fn read_stores_input_and_eof_leaves_cell() {
        let mut tape = [9u8; 2];
        let (result, out) = run_with(
            vec![Read, Write, IncPtr(1), Read, Write],
            &mut tape,
            b"x",
        );
        assert_eq!(result, Ok(()));
        assert_eq!(out, b"x\x09");
    }

    #[test]
    fn noop_is_a_pure_advance() {
        let mut tape = [0u8; 1];
        let (result, _) = run_with(vec![Noop, IncVal(1), Noop], &mut tape, b"");
        assert_eq!(result, Ok(()));
        assert_eq!(tape[0], 1);
    }

    #[test]
    fn output_before_failure_is_kept() {
        let mut tape = [66u8; 1];
        let (result, out) = run_with(vec![Write, IncPtr(1), Write], &mut tape, b"");
        assert!(result.is_err());
        assert_eq!(out, b"B");
    }

    #[test]
    fn infinite_loop_hits_step_limit() {
        let program = Program::new(vec![IncVal(1), LoopStart(2), LoopEnd(1)]);
        let mut tape = [0u8; 1];
        let mut vm = Machine::new(&program, &mut tape, std::io::empty(), std::io::sink())
            .with_step_limit(Some(10));
        assert!(matches!(
            vm.run(),
            Err(RuntimeError::StepLimitExceeded { limit: 10, .. })
        ));
        assert_eq!(vm.steps(), 10);
    }

    #[test]
    fn rerun_resets_pointer_but_not_tape() {
        let program = Program::new(vec![IncPtr(1), IncVal(1)]);
        let mut tape = [0u8; 2];
        let mut vm = Machine::new(&program, &mut tape, std::io::empty(), std::io::sink());
        vm.run().unwrap();
        vm.run().unwrap();
        assert_eq!(vm.steps(), 2);
        assert_eq!(tape, [0, 2]);
    }
}
