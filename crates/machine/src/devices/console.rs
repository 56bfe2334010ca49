//! Console devices.
//!
//! This module defines the `Console` trait and its implementations. It provides:
//! 1. **Input:** Blocking single-byte reads with a distinct end-of-stream result.
//! 2. **Output:** Single-byte writes, buffered until flushed.
//! 3. **Implementations:** Host streams (`StreamConsole`) and in-memory queues (`BufferConsole`).

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufWriter, ErrorKind, Read, Stdout, StdinLock, Write};

/// Byte source and sink for the Input and Output instructions.
pub trait Console {
    /// Reads one byte, blocking until it arrives.
    ///
    /// Returns `Ok(None)` at end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes one byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Flushes any buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Console over an arbitrary reader and writer.
///
/// Pending output is flushed before every read, so a program's prompt is
/// visible before it blocks on input.
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
}

impl StreamConsole<StdinLock<'static>, BufWriter<Stdout>> {
    /// Console over the process's locked stdin and buffered stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), BufWriter::new(io::stdout()))
    }
}

impl<R: Read, W: Write> StreamConsole<R, W> {
    /// Creates a console reading from `reader` and writing to `writer`.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Returns the writer, discarding the reader.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: Read, W: Write> Console for StreamConsole<R, W> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.writer.flush()?;
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<R, W> fmt::Debug for StreamConsole<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamConsole").finish_non_exhaustive()
    }
}

/// In-memory console: a queue of input bytes and a captured output buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferConsole {
    /// Creates a console with no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a console that will deliver `input` and then end of stream.
    pub fn with_input(input: impl AsRef<[u8]>) -> Self {
        Self {
            input: input.as_ref().iter().copied().collect(),
            output: Vec::new(),
        }
    }

    /// Bytes written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Input bytes not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// Consumes the console, returning the captured output.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl Console for BufferConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}
