//! # Execution Tests
//!
//! The fetch/decode/dispatch loop: status transitions, program counter
//! handling, fault reporting, the unknown-opcode policy, and step budgets.

use pretty_assertions::assert_eq;
use umvm_core::asm::{Op, R0, R1, R2, R3, assemble};
use umvm_core::config::{Config, UnknownOpcodePolicy};
use umvm_core::isa::encode::raw_opcode;
use umvm_core::{Fault, Machine, Status};

use crate::common::TestContext;

#[test]
fn new_machine_is_zeroed_and_running() {
    let ctx = TestContext::new(&[Op::Halt]);
    assert_eq!(*ctx.machine.status(), Status::Running);
    assert_eq!(ctx.machine.pc(), 0);
    assert_eq!(ctx.machine.registers().snapshot(), [0; 8]);
    assert_eq!(ctx.machine.segments().active_count(), 1);
}

#[test]
fn hello_runs_to_halt() {
    let mut ctx = TestContext::new(&[
        Op::Lv(R1, 72),
        Op::Lv(R2, 105),
        Op::Out(R1),
        Op::Out(R2),
        Op::Halt,
    ]);
    assert_eq!(ctx.run(), Status::Halted);
    assert_eq!(ctx.output(), b"Hi");
    assert_eq!(ctx.machine.pc(), 5);
}

#[test]
fn pc_advances_before_dispatch() {
    let mut ctx = TestContext::new(&[Op::Lv(R1, 1), Op::Lv(R2, 2), Op::Halt]);
    assert_eq!(ctx.step(), Status::Running);
    assert_eq!(ctx.machine.pc(), 1);
    assert_eq!(ctx.reg(R1), 1);
    ctx.step_n(1);
    assert_eq!(ctx.machine.pc(), 2);
    assert_eq!(ctx.step(), Status::Halted);
    assert_eq!(ctx.machine.pc(), 3);
}

#[test]
fn halted_machine_ignores_further_steps() {
    let mut ctx = TestContext::new(&[Op::Halt, Op::Lv(R1, 9)]);
    assert_eq!(ctx.run(), Status::Halted);
    let pc = ctx.machine.pc();
    assert_eq!(ctx.step(), Status::Halted);
    assert_eq!(ctx.run(), Status::Halted);
    assert_eq!(ctx.machine.pc(), pc);
    assert_eq!(ctx.reg(R1), 0);
}

#[test]
fn divide_by_zero_stops_before_later_output() {
    let mut ctx = TestContext::new(&[
        Op::Lv(R1, 65),
        Op::Out(R1),
        Op::Div(R3, R1, R2),
        Op::Out(R1),
        Op::Halt,
    ]);
    assert_eq!(ctx.run(), Status::Failed(Fault::DivideByZero));
    assert_eq!(ctx.output(), b"A");
    assert_eq!(ctx.reg(R3), 0);
}

#[test]
fn failed_machine_stays_failed() {
    let mut ctx = TestContext::new(&[Op::Div(R1, R1, R1), Op::Halt]);
    let status = ctx.run();
    assert_eq!(status, Status::Failed(Fault::DivideByZero));
    assert_eq!(ctx.step(), status);
    assert_eq!(ctx.machine.status().fault(), Some(&Fault::DivideByZero));
}

#[test]
fn running_off_the_end_faults() {
    let mut ctx = TestContext::new(&[Op::Lv(R1, 1)]);
    assert_eq!(
        ctx.run(),
        Status::Failed(Fault::ProgramCounterOutOfRange { pc: 1, len: 1 })
    );
}

#[test]
fn empty_program_faults_on_first_fetch() {
    let mut ctx = TestContext::from_words(Vec::new(), &Config::default());
    assert_eq!(
        ctx.run(),
        Status::Failed(Fault::ProgramCounterOutOfRange { pc: 0, len: 0 })
    );
}

#[test]
fn output_above_255_faults() {
    let mut ctx = TestContext::new(&[Op::Lv(R1, 256), Op::Out(R1), Op::Halt]);
    assert_eq!(
        ctx.run(),
        Status::Failed(Fault::OutputRangeError { value: 256 })
    );
    assert!(ctx.output().is_empty());
}

#[test]
fn segment_faults_leave_registers_untouched() {
    let mut ctx = TestContext::new(&[
        Op::Lv(R1, 2),
        Op::Map(R2, R1),
        Op::Lv(R3, 2),
        Op::Lv(R0, 77),
        Op::SLoad(R0, R2, R3),
        Op::Halt,
    ]);
    assert_eq!(
        ctx.run(),
        Status::Failed(Fault::SegmentOutOfBounds {
            id: 1,
            offset: 2,
            len: 2
        })
    );
    assert_eq!(ctx.reg(R0), 77);
}

#[test]
fn unmapping_program_segment_faults() {
    let mut ctx = TestContext::new(&[Op::Unmap(R0), Op::Halt]);
    assert_eq!(
        ctx.run(),
        Status::Failed(Fault::InvalidSegmentAccess { id: 0 })
    );
    assert_eq!(ctx.machine.segments().program_len(), 2);
}

#[test]
fn unknown_opcode_fails_by_default() {
    let mut words = assemble(&[Op::Lv(R1, 1)]);
    words.push(raw_opcode(14) | 0x1234);
    words.extend(assemble(&[Op::Halt]));
    let mut ctx = TestContext::from_words(words, &Config::default());
    assert_eq!(
        ctx.run(),
        Status::Failed(Fault::UnknownOpcode {
            opcode: 14,
            word: 0xE000_1234
        })
    );
    assert_eq!(ctx.reg(R1), 1);
}

#[test]
fn unknown_opcode_halts_under_halt_policy() {
    let mut config = Config::default();
    config.machine.unknown_opcode = UnknownOpcodePolicy::Halt;
    let mut words = vec![raw_opcode(15)];
    words.extend(assemble(&[Op::Lv(R1, 1)]));
    let mut ctx = TestContext::from_words(words, &config);
    assert_eq!(ctx.run(), Status::Halted);
    assert_eq!(ctx.reg(R1), 0);
}

#[test]
fn step_budget_leaves_machine_running() {
    let mut config = Config::default();
    config.general.max_steps = Some(2);
    // An unconditional jump back to 0 loops forever.
    let mut ctx = TestContext::with_config(&[Op::Lv(R1, 0), Op::LoadP(R1, R1)], &config);
    assert_eq!(ctx.run(), Status::Running);
    assert_eq!(ctx.machine.pc(), 0);
    assert_eq!(ctx.machine.stats().instructions_retired, 2);
    assert_eq!(ctx.run(), Status::Running);
    assert_eq!(ctx.machine.stats().instructions_retired, 4);
}

#[test]
fn tracing_does_not_change_behaviour() {
    let mut config = Config::default();
    config.general.trace_instructions = true;
    let mut ctx = TestContext::with_config(&[Op::Lv(R1, 33), Op::Out(R1), Op::Halt], &config);
    assert_eq!(ctx.run(), Status::Halted);
    assert_eq!(ctx.output(), b"!");
}

#[test]
fn machine_from_bytes() {
    let bytes = [0xD2, 0x00, 0x00, 0x2A, 0x70, 0x00, 0x00, 0x00];
    let mut machine = Machine::from_bytes(&bytes, &Config::default()).unwrap();
    let mut console = umvm_core::devices::BufferConsole::new();
    assert_eq!(machine.run(&mut console), Status::Halted);
    assert_eq!(machine.registers().read(R1), 42);
}

#[test]
fn dump_state_reports_registers_and_status() {
    let mut ctx = TestContext::new(&[Op::Lv(R1, 0xAB), Op::Halt]);
    let _ = ctx.run();
    let dump = ctx.machine.dump_state();
    assert!(dump.contains("pc=2"));
    assert!(dump.contains("status=Halted"));
    assert!(dump.contains("r1=0x000000ab"));
}
