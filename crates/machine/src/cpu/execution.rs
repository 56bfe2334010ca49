//! Instruction execution.
//!
//! This module drives the machine. It performs the following:
//! 1. **Fetch:** Reads `segment0[pc]` and advances the counter before dispatch.
//! 2. **Decode:** Classifies the word.
//! 3. **Dispatch:** Invokes the matching handler and folds its result into `Status`.
//! 4. **Observability:** Optional per-instruction tracing and fault logging.
//!
//! The counter is advanced before the handler runs, so a Load Program jump
//! is the value the next fetch sees.

use tracing::{error, trace, warn};

use super::{Machine, Status};
use crate::common::{Fault, Word};
use crate::config::UnknownOpcodePolicy;
use crate::devices::Console;
use crate::isa::decode::{Instruction, decode};
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::Opcode;

/// What the engine does after a handler returns successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fetch the next instruction.
    Continue,
    /// Stop with `Status::Halted`.
    Halt,
}

impl Machine {
    /// Executes one instruction.
    ///
    /// Once the machine is `Halted` or `Failed`, this does nothing and
    /// returns the terminal status again.
    pub fn step<C: Console + ?Sized>(&mut self, console: &mut C) -> Status {
        self.advance(console);
        self.status.clone()
    }

    /// Executes instructions until the machine halts or fails.
    ///
    /// Output is flushed before returning. If `general.max_steps` is set and
    /// runs out first, the machine is left `Running` and can be resumed.
    pub fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Status {
        match self.max_steps {
            Some(max) => {
                for _ in 0..max {
                    if self.status.is_terminal() {
                        break;
                    }
                    self.advance(console);
                }
            }
            None => {
                while !self.status.is_terminal() {
                    self.advance(console);
                }
            }
        }
        if let Err(err) = console.flush() {
            if self.status.fault().is_none() {
                self.status = Status::Failed(err.into());
            }
        }
        self.status.clone()
    }

    fn advance<C: Console + ?Sized>(&mut self, console: &mut C) {
        if self.status.is_terminal() {
            return;
        }
        let pc = self.pc;
        match self.execute(console) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Halt) => self.status = Status::Halted,
            Err(fault) => {
                error!(pc, %fault, "machine fault");
                self.status = Status::Failed(fault);
            }
        }
    }

    fn execute<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<Flow, Fault> {
        let pc = self.pc;
        let word = self.segments.fetch(pc)?;
        self.pc = pc.wrapping_add(1);

        if self.trace {
            trace!(pc, "{word:#010x}  {}", disassemble(word));
        }

        let (op, flow) = match decode(word) {
            Instruction::LoadImmediate { a, value } => {
                self.load_immediate(a, value);
                (Opcode::LoadImmediate, Flow::Continue)
            }
            Instruction::ThreeRegister { op, a, b, c } => {
                (op, self.dispatch(console, op, a, b, c)?)
            }
            Instruction::Unknown { raw_opcode } => {
                return self.unknown(raw_opcode, word);
            }
        };
        self.stats.retire(op);
        Ok(flow)
    }

    fn dispatch<C: Console + ?Sized>(
        &mut self,
        console: &mut C,
        op: Opcode,
        a: usize,
        b: usize,
        c: usize,
    ) -> Result<Flow, Fault> {
        debug_assert_ne!(
            op,
            Opcode::LoadImmediate,
            "load immediate is decoded as its own instruction form"
        );
        match op {
            Opcode::ConditionalMove => self.conditional_move(a, b, c),
            Opcode::SegmentLoad => self.segment_load(a, b, c)?,
            Opcode::SegmentStore => self.segment_store(a, b, c)?,
            Opcode::Add => self.add(a, b, c),
            Opcode::Multiply => self.multiply(a, b, c),
            Opcode::Divide => self.divide(a, b, c)?,
            Opcode::Nand => self.nand(a, b, c),
            Opcode::Halt => return Ok(Flow::Halt),
            Opcode::MapSegment => self.map_segment(b, c)?,
            Opcode::UnmapSegment => self.unmap_segment(c)?,
            Opcode::Output => self.output(console, c)?,
            Opcode::Input => self.input(console, c)?,
            Opcode::LoadProgram => self.load_program(b, c)?,
            // Unreachable from `decode`; asserted above.
            Opcode::LoadImmediate => self.load_immediate(a, 0),
        }
        Ok(Flow::Continue)
    }

    fn unknown(&self, raw_opcode: u32, word: Word) -> Result<Flow, Fault> {
        match self.unknown_opcode {
            UnknownOpcodePolicy::Fail => Err(Fault::UnknownOpcode {
                opcode: raw_opcode,
                word,
            }),
            UnknownOpcodePolicy::Halt => {
                warn!(pc = self.pc.wrapping_sub(1), raw_opcode, "unknown opcode treated as halt");
                Ok(Flow::Halt)
            }
        }
    }
}
