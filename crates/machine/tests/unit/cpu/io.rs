//! # Console I/O Tests
//!
//! Input and Output against a mocked console (error propagation, end of
//! stream, range checks) and against `StreamConsole` over in-memory streams.

use std::io::{self, Cursor, ErrorKind};

use mockall::Sequence;
use mockall::predicate::eq;
use umvm_core::asm::{Op, R1, R2, assemble};
use umvm_core::config::Config;
use umvm_core::devices::{Console, StreamConsole};
use umvm_core::{Fault, Machine, Status};

use crate::common::TestContext;
use crate::common::mocks::console::MockByteConsole;

fn machine(ops: &[Op]) -> Machine {
    Machine::new(assemble(ops), &Config::default())
}

#[test]
fn output_writes_exact_byte() {
    let mut console = MockByteConsole::new();
    let _ = console
        .expect_write_byte()
        .with(eq(0xFF))
        .times(1)
        .returning(|_| Ok(()));
    let _ = console.expect_flush().times(1).returning(|| Ok(()));

    let mut m = machine(&[Op::Lv(R1, 255), Op::Out(R1), Op::Halt]);
    assert_eq!(m.run(&mut console), Status::Halted);
}

#[test]
fn output_out_of_range_never_reaches_console() {
    let mut console = MockByteConsole::new();
    let _ = console.expect_write_byte().never();
    let _ = console.expect_flush().returning(|| Ok(()));

    let mut m = machine(&[Op::Lv(R1, 0x100), Op::Out(R1), Op::Halt]);
    assert_eq!(
        m.run(&mut console),
        Status::Failed(Fault::OutputRangeError { value: 0x100 })
    );
}

#[test]
fn write_error_is_console_fault() {
    let mut console = MockByteConsole::new();
    let _ = console
        .expect_write_byte()
        .returning(|_| Err(io::Error::new(ErrorKind::BrokenPipe, "closed")));
    let _ = console.expect_flush().returning(|| Ok(()));

    let mut m = machine(&[Op::Lv(R1, 65), Op::Out(R1), Op::Halt]);
    assert_eq!(
        m.run(&mut console),
        Status::Failed(Fault::ConsoleIo {
            kind: ErrorKind::BrokenPipe
        })
    );
}

#[test]
fn read_error_is_console_fault() {
    let mut console = MockByteConsole::new();
    let _ = console
        .expect_read_byte()
        .returning(|| Err(io::Error::from(ErrorKind::PermissionDenied)));
    let _ = console.expect_flush().returning(|| Ok(()));

    let mut m = machine(&[Op::In(R1), Op::Halt]);
    assert_eq!(
        m.run(&mut console),
        Status::Failed(Fault::ConsoleIo {
            kind: ErrorKind::PermissionDenied
        })
    );
}

#[test]
fn end_of_input_loads_all_ones() {
    let mut console = MockByteConsole::new();
    let mut seq = Sequence::new();
    let _ = console
        .expect_read_byte()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(Some(0)));
    let _ = console
        .expect_read_byte()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(None));

    let mut m = machine(&[Op::In(R1), Op::In(R2), Op::Halt]);
    assert_eq!(m.step(&mut console), Status::Running);
    assert_eq!(m.step(&mut console), Status::Running);
    assert_eq!(m.registers().read(R1), 0);
    assert_eq!(m.registers().read(R2), 0xFFFF_FFFF);
}

#[test]
fn flush_failure_after_halt_is_reported() {
    let mut console = MockByteConsole::new();
    let _ = console
        .expect_flush()
        .returning(|| Err(io::Error::from(ErrorKind::WriteZero)));

    let mut m = machine(&[Op::Halt]);
    assert_eq!(
        m.run(&mut console),
        Status::Failed(Fault::ConsoleIo {
            kind: ErrorKind::WriteZero
        })
    );
}

#[test]
fn flush_failure_does_not_mask_earlier_fault() {
    let mut console = MockByteConsole::new();
    let _ = console
        .expect_flush()
        .returning(|| Err(io::Error::from(ErrorKind::WriteZero)));

    let mut m = machine(&[Op::Div(R1, R1, R1)]);
    assert_eq!(m.run(&mut console), Status::Failed(Fault::DivideByZero));
}

#[test]
fn echo_through_buffer_console() {
    let mut ctx = TestContext::new(&[
        Op::In(R1),
        Op::Out(R1),
        Op::In(R1),
        Op::Out(R1),
        Op::Halt,
    ])
    .with_input(b"ok");
    assert_eq!(ctx.run(), Status::Halted);
    assert_eq!(ctx.output(), b"ok");
    assert_eq!(ctx.console.remaining_input(), 0);
}

#[test]
fn stream_console_reads_then_reports_end() {
    let mut console = StreamConsole::new(Cursor::new(vec![7u8]), Vec::new());
    assert_eq!(console.read_byte().unwrap(), Some(7));
    assert_eq!(console.read_byte().unwrap(), None);
    assert_eq!(console.read_byte().unwrap(), None);
}

#[test]
fn stream_console_buffers_output() {
    let mut m = machine(&[
        Op::In(R1),
        Op::Out(R1),
        Op::Out(R1),
        Op::In(R2),
        Op::Halt,
    ]);
    let mut console = StreamConsole::new(Cursor::new(b"x".to_vec()), Vec::new());
    assert_eq!(m.run(&mut console), Status::Halted);
    assert_eq!(console.into_writer(), b"xx");
    assert_eq!(m.registers().read(R2), 0xFFFF_FFFF);
}
