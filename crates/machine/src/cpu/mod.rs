//! Machine Definition and Initialization.
//!
//! This module defines the central `Machine` structure, which owns the entire
//! machine state. It coordinates the following:
//! 1. **State Management:** Registers, program counter, and run status.
//! 2. **Memory:** The segment store, with segment 0 holding the program.
//! 3. **Observability:** Execution statistics and optional instruction tracing.

/// Fetch/decode/dispatch loop and the run state machine.
pub mod execution;

pub use execution::Flow;

/// The 14 operation handlers.
mod ops;

use crate::common::{Fault, RegisterFile, Word};
use crate::config::{Config, UnknownOpcodePolicy};
use crate::memory::SegmentStore;
use crate::sim::loader;
use crate::stats::SimStats;

/// Run state of the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// More instructions can execute.
    Running,
    /// A Halt instruction executed.
    Halted,
    /// A fatal condition ended the run.
    Failed(Fault),
}

impl Status {
    /// Whether the machine has stopped for good.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// The fault that ended the run, if any.
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Failed(fault) => Some(fault),
            _ => None,
        }
    }
}

/// The machine: registers, segment store, program counter, and run status.
///
/// Created once per program, mutated in place by `step`/`run`, and dropped
/// (releasing every segment) when the caller is done with it.
#[derive(Debug)]
pub struct Machine {
    regs: RegisterFile,
    segments: SegmentStore,
    pc: Word,
    status: Status,
    stats: SimStats,

    trace: bool,
    unknown_opcode: UnknownOpcodePolicy,
    max_steps: Option<u64>,
}

impl Machine {
    /// Creates a machine whose segment 0 holds `program`.
    ///
    /// All registers start at zero, the program counter at 0, and the
    /// status at `Running`.
    pub fn new(program: Vec<Word>, config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            segments: SegmentStore::with_capacity(
                program,
                config.machine.initial_segment_capacity,
            ),
            pc: 0,
            status: Status::Running,
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            unknown_opcode: config.machine.unknown_opcode,
            max_steps: config.general.max_steps,
        }
    }

    /// Creates a machine from a big-endian program image.
    ///
    /// # Errors
    ///
    /// `Fault::MalformedProgram` if the image ends in a partial word and
    /// `config.loader.allow_trailing_bytes` is not set.
    pub fn from_bytes(bytes: &[u8], config: &Config) -> Result<Self, Fault> {
        let program = loader::pack_words(bytes, config.loader.allow_trailing_bytes)?;
        Ok(Self::new(program, config))
    }

    /// Index of the next instruction to fetch from segment 0.
    pub const fn pc(&self) -> Word {
        self.pc
    }

    /// Current run status.
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// The register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Mutable access to the register file, for harnesses that seed state.
    pub const fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    /// The segment store.
    pub const fn segments(&self) -> &SegmentStore {
        &self.segments
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Registers, program counter, and status formatted for diagnostics.
    pub fn dump_state(&self) -> String {
        format!(
            "pc={} program_len={} active_segments={} status={:?}\n{}",
            self.pc,
            self.segments.program_len(),
            self.segments.active_count(),
            self.status,
            self.regs.dump()
        )
    }
}
