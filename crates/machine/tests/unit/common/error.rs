//! # Fault Tests
//!
//! Display text and conversions for the fatal fault taxonomy.

use std::io;

use umvm_core::Fault;

#[test]
fn display_carries_offending_values() {
    assert_eq!(
        Fault::ProgramCounterOutOfRange { pc: 9, len: 4 }.to_string(),
        "program counter 9 is outside segment 0 (length 4)"
    );
    assert_eq!(
        Fault::OutputRangeError { value: 256 }.to_string(),
        "output value 0x100 exceeds 255"
    );
    assert_eq!(
        Fault::InvalidSegmentAccess { id: 3 }.to_string(),
        "segment 3 is not mapped"
    );
    assert_eq!(
        Fault::DoubleUnmap { id: 2 }.to_string(),
        "segment 2 was already unmapped"
    );
    assert_eq!(
        Fault::UnknownOpcode {
            opcode: 14,
            word: 0xE000_0000
        }
        .to_string(),
        "unknown opcode 14 in instruction 0xe0000000"
    );
    assert_eq!(
        Fault::SegmentAllocationFailed { len: 12 }.to_string(),
        "cannot allocate a segment of 12 words"
    );
    assert_eq!(
        Fault::MalformedProgram { len: 7 }.to_string(),
        "program image of 7 bytes ends in a partial word"
    );
}

#[test]
fn io_errors_become_console_faults() {
    let fault: Fault = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
    assert_eq!(
        fault,
        Fault::ConsoleIo {
            kind: io::ErrorKind::BrokenPipe
        }
    );
}

#[test]
fn faults_are_std_errors() {
    fn assert_error<E: std::error::Error + Clone + Eq>(_: &E) {}
    assert_error(&Fault::DivideByZero);
}
