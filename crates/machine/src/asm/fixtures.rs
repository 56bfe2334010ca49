//! Named unit programs.
//!
//! Each fixture is a short instruction stream exercising one instruction or
//! one segment-store behaviour, paired with the bytes it reads, the bytes it
//! must write, and how it must stop. `write_fixture` produces the on-disk
//! triple used by external runners:
//!
//! ```text
//! <name>.um   program image
//! <name>.0    input bytes (absent when the program reads nothing)
//! <name>.1    expected output (absent when the program writes nothing)
//! ```

use std::fs;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Op, R0, R1, R2, R3, R4, R5, R6, R7, assemble, write_program};
use crate::common::{Fault, Word};
use crate::cpu::Status;

/// A named unit program and its expected behaviour.
#[derive(Clone, Debug)]
pub struct Fixture {
    /// Name used for the output files and on the command line.
    pub name: &'static str,
    /// Bytes fed to Input.
    pub input: &'static [u8],
    /// Bytes Output must produce.
    pub expected_output: &'static [u8],
    /// How the run must end.
    pub expected_status: Status,
    /// The program.
    pub ops: &'static [Op],
}

impl Fixture {
    /// The assembled program.
    pub fn program(&self) -> Vec<Word> {
        assemble(self.ops)
    }
}

/// `1 << 28`, built from 25-bit immediates.
const OPCODE_UNIT: [Op; 3] = [Op::Lv(R7, 1 << 24), Op::Lv(R6, 16), Op::Mul(R5, R7, R6)];

/// Every fixture, in the order `umlab` writes them.
pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "halt",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[Op::Halt],
    },
    Fixture {
        name: "loadVal",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[Op::Lv(R1, b'A' as Word), Op::Halt],
    },
    Fixture {
        name: "halt-verbose",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[
            Op::Halt,
            Op::Lv(R1, b'B' as Word),
            Op::Out(R1),
            Op::Lv(R1, b'a' as Word),
            Op::Out(R1),
            Op::Lv(R1, b'd' as Word),
            Op::Out(R1),
            Op::Lv(R1, b'!' as Word),
            Op::Out(R1),
            Op::Lv(R1, b'\n' as Word),
            Op::Out(R1),
        ],
    },
    Fixture {
        name: "add",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[Op::Add(R1, R2, R3), Op::Halt],
    },
    Fixture {
        name: "print-six",
        input: b"",
        expected_output: b"6",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 48),
            Op::Lv(R2, 6),
            Op::Add(R3, R2, R1),
            Op::Out(R3),
            Op::Halt,
        ],
    },
    Fixture {
        name: "hello",
        input: b"",
        expected_output: b"Hi",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 72),
            Op::Lv(R2, 105),
            Op::Out(R1),
            Op::Out(R2),
            Op::Halt,
        ],
    },
    Fixture {
        name: "mul",
        input: b"",
        expected_output: b"2\n",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 10),
            Op::Lv(R2, 5),
            Op::Mul(R3, R1, R2),
            Op::Out(R3),
            Op::Lv(R1, 10),
            Op::Out(R1),
            Op::Halt,
        ],
    },
    Fixture {
        name: "div",
        input: b"",
        expected_output: b"4\n",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 208),
            Op::Lv(R2, 4),
            Op::Div(R3, R1, R2),
            Op::Out(R3),
            Op::Lv(R1, 10),
            Op::Out(R1),
            Op::Halt,
        ],
    },
    Fixture {
        name: "cMov",
        input: b"",
        expected_output: b"4\nQ\n",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 52),
            Op::Lv(R2, 81),
            Op::Lv(R3, 0),
            Op::Lv(R4, 10),
            Op::CMov(R1, R2, R3),
            Op::Out(R1),
            Op::Out(R4),
            Op::Lv(R3, 4),
            Op::CMov(R1, R2, R3),
            Op::Out(R1),
            Op::Out(R4),
            Op::Halt,
        ],
    },
    Fixture {
        name: "nand",
        input: b"",
        expected_output: b"J\n",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R4, 10),
            Op::Lv(R1, 74),
            Op::Nand(R2, R1, R1),
            Op::Lv(R5, 0x0101_0101),
            Op::Lv(R6, 255),
            Op::Mul(R7, R6, R5),
            Op::Nand(R3, R2, R7),
            Op::Out(R3),
            Op::Out(R4),
            Op::Halt,
        ],
    },
    Fixture {
        name: "map",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[Op::Lv(R1, 10), Op::Map(R2, R1), Op::Halt],
    },
    Fixture {
        name: "unmap",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[Op::Lv(R1, 27), Op::Map(R2, R1), Op::Unmap(R2), Op::Halt],
    },
    Fixture {
        name: "remap",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 27),
            Op::Lv(R4, 250),
            Op::Lv(R5, 33),
            Op::Map(R2, R1),
            Op::Unmap(R2),
            Op::Map(R2, R4),
            Op::Map(R6, R5),
            Op::Unmap(R2),
            Op::Unmap(R6),
            Op::Map(R2, R4),
            Op::Halt,
        ],
    },
    Fixture {
        name: "load",
        input: b"",
        expected_output: b"\0",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 69),
            Op::Lv(R3, 5),
            Op::Map(R2, R1),
            Op::SLoad(R1, R2, R3),
            Op::Out(R1),
            Op::Halt,
        ],
    },
    Fixture {
        name: "store",
        input: b"",
        expected_output: b"*",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, 69),
            Op::Lv(R2, 42),
            Op::Lv(R4, 25),
            Op::Map(R3, R1),
            Op::SStore(R3, R4, R2),
            Op::SLoad(R5, R3, R4),
            Op::Out(R5),
            Op::Halt,
        ],
    },
    Fixture {
        name: "input",
        input: b"U",
        expected_output: b"U",
        expected_status: Status::Halted,
        ops: &[Op::In(R1), Op::Out(R1), Op::Halt],
    },
    Fixture {
        name: "input-eof",
        input: b"",
        expected_output: b"!",
        expected_status: Status::Halted,
        ops: &[
            // r2 = !(r1 & r1) is zero only when r1 is all ones.
            Op::In(R1),
            Op::Nand(R2, R1, R1),
            Op::Lv(R5, b'!' as Word),
            Op::Lv(R6, b'?' as Word),
            Op::CMov(R5, R6, R2),
            Op::Out(R5),
            Op::Halt,
        ],
    },
    Fixture {
        name: "loadProg",
        input: b"",
        expected_output: b"",
        expected_status: Status::Halted,
        ops: &[
            OPCODE_UNIT[0],
            OPCODE_UNIT[1],
            OPCODE_UNIT[2],
            // r1 = halt instruction word
            Op::Lv(R1, 7),
            Op::Mul(R1, R1, R5),
            Op::Lv(R3, 1),
            Op::Map(R2, R3),
            Op::Lv(R4, 0),
            Op::SStore(R2, R4, R1),
            Op::LoadP(R2, R4),
            Op::Lv(R0, b'X' as Word),
            Op::Out(R0),
            Op::Halt,
        ],
    },
    Fixture {
        name: "loadProg-jump",
        input: b"",
        expected_output: b"Y",
        expected_status: Status::Halted,
        ops: &[
            Op::Lv(R1, b'Y' as Word),
            Op::Lv(R3, 0),
            Op::Lv(R2, 5),
            Op::LoadP(R3, R2),
            Op::Out(R1),
            Op::Out(R1),
            Op::Halt,
        ],
    },
    Fixture {
        name: "divide-by-zero",
        input: b"",
        expected_output: b"",
        expected_status: Status::Failed(Fault::DivideByZero),
        ops: &[
            Op::Lv(R1, 1),
            Op::Lv(R2, 0),
            Op::Div(R3, R1, R2),
            Op::Halt,
        ],
    },
    Fixture {
        name: "double-unmap",
        input: b"",
        expected_output: b"A",
        expected_status: Status::Failed(Fault::DoubleUnmap { id: 1 }),
        ops: &[
            Op::Lv(R1, 1),
            Op::Map(R2, R1),
            Op::Lv(R3, b'A' as Word),
            Op::Lv(R4, 0),
            Op::SStore(R2, R4, R3),
            Op::SLoad(R5, R2, R4),
            Op::Out(R5),
            Op::Unmap(R2),
            Op::Unmap(R2),
            Op::Halt,
        ],
    },
];

/// Looks up a fixture by name.
pub fn find(name: &str) -> Option<&'static Fixture> {
    FIXTURES.iter().find(|f| f.name == name)
}

/// Writes `<name>.um`, `<name>.0`, and `<name>.1` for `fixture` into `dir`.
///
/// The input and expected-output files are removed instead when empty.
///
/// # Returns
///
/// Path of the program image.
///
/// # Errors
///
/// Propagates file creation and write failures.
pub fn write_fixture(dir: &Path, fixture: &Fixture) -> io::Result<PathBuf> {
    let image = dir.join(format!("{}.um", fixture.name));
    let mut out = BufWriter::new(fs::File::create(&image)?);
    write_program(&mut out, &fixture.program())?;
    out.flush()?;

    write_or_remove(&dir.join(format!("{}.0", fixture.name)), fixture.input)?;
    write_or_remove(
        &dir.join(format!("{}.1", fixture.name)),
        fixture.expected_output,
    )?;
    debug!(name = fixture.name, path = %image.display(), "fixture written");
    Ok(image)
}

fn write_or_remove(path: &Path, contents: &[u8]) -> io::Result<()> {
    if contents.is_empty() {
        return match fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };
    }
    fs::write(path, contents)
}
