//! Execution statistics collection and reporting.
//!
//! This module tracks what a run did. It provides:
//! 1. **Throughput:** Instructions retired and host-side execution rate.
//! 2. **Instruction mix:** Counts per opcode.
//! 3. **Segments:** Maps, unmaps, identifier reuse, and the live-segment high-water mark.
//! 4. **Programs and I/O:** Program loads and console traffic.

use std::io::{self, Write};
use std::time::Instant;

use crate::isa::opcodes::{OPCODE_COUNT, Opcode};

/// Statistics gathered by the engine while it runs.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of instructions executed to completion.
    pub instructions_retired: u64,
    /// Executed instructions per opcode, indexed by opcode value.
    pub op_counts: [u64; OPCODE_COUNT],

    /// Segments mapped.
    pub segments_mapped: u64,
    /// Segments unmapped.
    pub segments_unmapped: u64,
    /// Maps that reused a released identifier.
    pub segments_recycled: u64,
    /// Largest number of simultaneously active segments, including segment 0.
    pub peak_active_segments: usize,

    /// Program loads that copied a segment into segment 0.
    pub program_loads: u64,
    /// Program loads from segment 0 (plain jumps).
    pub program_jumps: u64,

    /// Bytes consumed by Input.
    pub bytes_in: u64,
    /// Bytes produced by Output.
    pub bytes_out: u64,
    /// Input instructions that observed end of stream.
    pub input_eof: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            op_counts: [0; OPCODE_COUNT],
            segments_mapped: 0,
            segments_unmapped: 0,
            segments_recycled: 0,
            peak_active_segments: 1,
            program_loads: 0,
            program_jumps: 0,
            bytes_in: 0,
            bytes_out: 0,
            input_eof: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "segments", "io"];

impl SimStats {
    /// Records one retired instruction.
    #[inline(always)]
    pub fn retire(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        self.op_counts[op as usize] += 1;
    }

    /// Retired count for one opcode.
    pub const fn count(&self, op: Opcode) -> u64 {
        self.op_counts[op as usize]
    }

    /// Writes the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`].
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn print_sections(&self, out: &mut impl Write, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1);

        if want("summary") {
            let mips = if seconds > 0.0 {
                (self.instructions_retired as f64 / seconds) / 1_000_000.0
            } else {
                0.0
            };
            writeln!(out, "\n==========================================================")?;
            writeln!(out, "UNIVERSAL MACHINE EXECUTION STATISTICS")?;
            writeln!(out, "==========================================================")?;
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_mips                 {mips:.2}")?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for op in Opcode::ALL {
                let n = self.count(op);
                if n == 0 {
                    continue;
                }
                writeln!(
                    out,
                    "  op.{:<20} {} ({:.2}%)",
                    op.mnemonic(),
                    n,
                    (n as f64 / instr as f64) * 100.0
                )?;
            }
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("segments") {
            writeln!(out, "SEGMENTS")?;
            writeln!(out, "  seg.mapped             {}", self.segments_mapped)?;
            writeln!(out, "  seg.unmapped           {}", self.segments_unmapped)?;
            writeln!(out, "  seg.recycled           {}", self.segments_recycled)?;
            writeln!(out, "  seg.peak_active        {}", self.peak_active_segments)?;
            writeln!(out, "  prog.loads             {}", self.program_loads)?;
            writeln!(out, "  prog.jumps             {}", self.program_jumps)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("io") {
            writeln!(out, "CONSOLE")?;
            writeln!(out, "  io.bytes_in            {}", self.bytes_in)?;
            writeln!(out, "  io.bytes_out           {}", self.bytes_out)?;
            writeln!(out, "  io.eof_reads           {}", self.input_eof)?;
            writeln!(out, "==========================================================")?;
        }
        Ok(())
    }

    /// Writes every section.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        self.print_sections(out, &[])
    }
}
