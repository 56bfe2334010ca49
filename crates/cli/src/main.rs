//! Universal machine runner.
//!
//! Loads a program image into segment 0 and runs it, with the machine's
//! Input and Output instructions wired to stdin and stdout. It performs:
//! 1. **Loading:** Reads the image named on the command line.
//! 2. **Execution:** Runs until Halt or a fault.
//! 3. **Reporting:** Faults, logs, and optional statistics go to stderr; the exit status is 0 only on Halt.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use umvm_core::config::Config;
use umvm_core::devices::StreamConsole;
use umvm_core::sim::loader;
use umvm_core::stats::SimStats;
use umvm_core::{Machine, Status};

#[derive(Parser, Debug)]
#[command(
    name = "um",
    version,
    about = "Run a universal machine program",
    long_about = "Run a universal machine program image.\n\nThe image is a flat sequence of big-endian 32-bit instructions. Input reads stdin one byte at a time, Output writes stdout. Diagnostics go to stderr; set RUST_LOG=debug for segment events or enable trace_instructions in a config file.\n\nExamples:\n  um sandmark.umz\n  um --stats --config trace.json hello.um < input.txt"
)]
struct Cli {
    /// Program image to execute.
    program: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print execution statistics to stderr when the machine stops.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::from_json_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("um: {e}");
            return ExitCode::FAILURE;
        }
    };

    let program = match loader::load_program(&cli.program, &config) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("um: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut machine = Machine::new(program, &config);
    let mut console = StreamConsole::stdio();
    let status = machine.run(&mut console);
    debug!(
        ?status,
        retired = machine.stats().instructions_retired,
        "machine stopped"
    );

    if cli.stats {
        let mut stderr = io::stderr().lock();
        if let Err(e) = report_stats(machine.stats(), &mut stderr) {
            eprintln!("um: could not write statistics: {e}");
        }
    }

    match status {
        Status::Halted => ExitCode::SUCCESS,
        Status::Failed(fault) => {
            eprintln!("um: fatal: {fault}");
            eprint!("{}", machine.dump_state());
            ExitCode::FAILURE
        }
        Status::Running => {
            eprintln!(
                "um: step budget exhausted after {} instructions",
                machine.stats().instructions_retired
            );
            ExitCode::FAILURE
        }
    }
}

/// Writes the statistics report and flushes it.
fn report_stats(stats: &SimStats, out: &mut impl Write) -> io::Result<()> {
    stats.print(out)?;
    out.flush()
}

/// Routes `tracing` output to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
