//! Unit-test writer for the universal machine.
//!
//! Writes named fixture programs as `<name>.um` images with their `<name>.0`
//! input and `<name>.1` expected-output files. With no names, every fixture
//! is written.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use umvm_core::asm::fixtures::{self, FIXTURES, Fixture};

#[derive(Parser, Debug)]
#[command(name = "umlab", version, about = "Write universal machine unit-test fixtures")]
struct Cli {
    /// Fixtures to write (default: all).
    names: Vec<String>,

    /// Directory to write into.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// List fixture names and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for f in FIXTURES {
            println!("{}", f.name);
        }
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    let selected: Vec<&Fixture> = if cli.names.is_empty() {
        FIXTURES.iter().collect()
    } else {
        cli.names
            .iter()
            .filter_map(|name| {
                let found = fixtures::find(name);
                if found.is_none() {
                    eprintln!("***** No test named {name} *****");
                    failed = true;
                }
                found
            })
            .collect()
    };

    for fixture in selected {
        println!("***** Writing test '{}'.", fixture.name);
        if let Err(e) = fixtures::write_fixture(&cli.out_dir, fixture) {
            eprintln!("umlab: could not write '{}': {e}", fixture.name);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
