mod replay;

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use arbor_sync::CodecRegistry;
use camino::Utf8PathBuf;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
struct Options {
    /// Raise log verbosity: `-v` for debug, `-vv` for trace.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Feed a recorded transcript, one JSON array of items per line, to a receiver.
    Replay { transcript: Utf8PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    let options = Options::parse();
    setup(options.verbose);

    match options.command {
        Command::Replay { transcript } => {
            let file = File::open(&transcript)
                .with_context(|| format!("failed to open `{transcript}`"))?;
            let registry = Arc::new(CodecRegistry::standard()?);

            let summary = replay::replay(registry, BufReader::new(file), &mut io::stdout().lock())
                .with_context(|| format!("failed to replay `{transcript}`"))?;
            eprintln!("{summary}");

            Ok(if summary.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

fn setup(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
