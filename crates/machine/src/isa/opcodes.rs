//! Opcode definitions.
//!
//! The opcode occupies the top four bits of every instruction. Values 0-13 are
//! defined; 14 and 15 have no operation.

/// Conditional move.
pub const OP_CMOV: u32 = 0;
/// Segment load.
pub const OP_SLOAD: u32 = 1;
/// Segment store.
pub const OP_SSTORE: u32 = 2;
/// Addition.
pub const OP_ADD: u32 = 3;
/// Multiplication.
pub const OP_MUL: u32 = 4;
/// Unsigned division.
pub const OP_DIV: u32 = 5;
/// Bitwise NAND.
pub const OP_NAND: u32 = 6;
/// Halt.
pub const OP_HALT: u32 = 7;
/// Map segment.
pub const OP_MAP: u32 = 8;
/// Unmap segment.
pub const OP_UNMAP: u32 = 9;
/// Output one byte.
pub const OP_OUT: u32 = 10;
/// Input one byte.
pub const OP_IN: u32 = 11;
/// Load program.
pub const OP_LOADP: u32 = 12;
/// Load immediate.
pub const OP_LV: u32 = 13;

/// Number of defined opcodes.
pub const OPCODE_COUNT: usize = 14;

/// The 14 defined operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// `if R[c] != 0 { R[a] = R[b] }`.
    ConditionalMove = 0,
    /// `R[a] = Segment[R[b]][R[c]]`.
    SegmentLoad = 1,
    /// `Segment[R[a]][R[b]] = R[c]`.
    SegmentStore = 2,
    /// `R[a] = R[b] + R[c]`, wrapping.
    Add = 3,
    /// `R[a] = R[b] * R[c]`, wrapping.
    Multiply = 4,
    /// `R[a] = R[b] / R[c]`, unsigned.
    Divide = 5,
    /// `R[a] = !(R[b] & R[c])`.
    Nand = 6,
    /// Stop the machine.
    Halt = 7,
    /// Map a zeroed segment of `R[c]` words; its identifier goes to `R[b]`.
    MapSegment = 8,
    /// Unmap segment `R[c]`.
    UnmapSegment = 9,
    /// Write the byte `R[c]`.
    Output = 10,
    /// Read one byte into `R[c]`.
    Input = 11,
    /// Replace segment 0 with a copy of segment `R[b]` and jump to `R[c]`.
    LoadProgram = 12,
    /// `R[a] = value`.
    LoadImmediate = 13,
}

impl Opcode {
    /// Every opcode in numeric order.
    pub const ALL: [Self; OPCODE_COUNT] = [
        Self::ConditionalMove,
        Self::SegmentLoad,
        Self::SegmentStore,
        Self::Add,
        Self::Multiply,
        Self::Divide,
        Self::Nand,
        Self::Halt,
        Self::MapSegment,
        Self::UnmapSegment,
        Self::Output,
        Self::Input,
        Self::LoadProgram,
        Self::LoadImmediate,
    ];

    /// Converts a raw four-bit opcode into an `Opcode`.
    ///
    /// Returns `None` for 14, 15, and anything wider than four bits.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            OP_CMOV => Self::ConditionalMove,
            OP_SLOAD => Self::SegmentLoad,
            OP_SSTORE => Self::SegmentStore,
            OP_ADD => Self::Add,
            OP_MUL => Self::Multiply,
            OP_DIV => Self::Divide,
            OP_NAND => Self::Nand,
            OP_HALT => Self::Halt,
            OP_MAP => Self::MapSegment,
            OP_UNMAP => Self::UnmapSegment,
            OP_OUT => Self::Output,
            OP_IN => Self::Input,
            OP_LOADP => Self::LoadProgram,
            OP_LV => Self::LoadImmediate,
            _ => return None,
        })
    }

    /// The numeric opcode.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Short assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ConditionalMove => "cmov",
            Self::SegmentLoad => "sload",
            Self::SegmentStore => "sstore",
            Self::Add => "add",
            Self::Multiply => "mul",
            Self::Divide => "div",
            Self::Nand => "nand",
            Self::Halt => "halt",
            Self::MapSegment => "map",
            Self::UnmapSegment => "unmap",
            Self::Output => "out",
            Self::Input => "in",
            Self::LoadProgram => "loadp",
            Self::LoadImmediate => "lv",
        }
    }
}
