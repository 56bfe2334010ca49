use umvm_core::asm::{Op, assemble};
use umvm_core::common::Word;
use umvm_core::config::Config;
use umvm_core::devices::BufferConsole;
use umvm_core::{Machine, Status};

/// A machine plus an in-memory console.
#[derive(Debug)]
pub struct TestContext {
    pub machine: Machine,
    pub console: BufferConsole,
}

impl TestContext {
    /// Builds a machine running `ops` with the default configuration.
    pub fn new(ops: &[Op]) -> Self {
        Self::with_config(ops, &Config::default())
    }

    /// Builds a machine running `ops` with `config`.
    pub fn with_config(ops: &[Op], config: &Config) -> Self {
        Self::from_words(assemble(ops), config)
    }

    /// Builds a machine whose segment 0 is exactly `words`.
    pub fn from_words(words: Vec<Word>, config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
        Self {
            machine: Machine::new(words, config),
            console: BufferConsole::new(),
        }
    }

    /// Replaces the console with one that delivers `input`.
    pub fn with_input(mut self, input: &[u8]) -> Self {
        self.console = BufferConsole::with_input(input);
        self
    }

    /// Runs to completion.
    pub fn run(&mut self) -> Status {
        self.machine.run(&mut self.console)
    }

    /// Executes a single instruction.
    pub fn step(&mut self) -> Status {
        self.machine.step(&mut self.console)
    }

    /// Executes `n` instructions, asserting each leaves the machine running.
    pub fn step_n(&mut self, n: usize) {
        for i in 0..n {
            assert_eq!(self.step(), Status::Running, "step {i} stopped the machine");
        }
    }

    /// Read a register.
    pub fn reg(&self, idx: usize) -> Word {
        self.machine.registers().read(idx)
    }

    /// Bytes written by Output so far.
    pub fn output(&self) -> &[u8] {
        self.console.output()
    }
}
