//! Tally CLI
//!
//! Computes per-key min/mean/max over a `<key>;<value>` measurement file and
//! prints the lexicographically sorted summary to stdout.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize with automatic worker count
//! tally measurements.txt
//!
//! # Pin the worker count (1 = sequential verification run)
//! tally measurements.txt --workers 1
//!
//! # Tune the per-worker read buffer
//! tally measurements.txt --read-buffer-size 4194304
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls verbosity); only the summary is
//! written to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tally_engine::{summarize, FileSource, SummaryConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output buffer size for the summary stream.
const OUT_BUFFER_SIZE: usize = 16 * 1024;

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Summarize per-key min/mean/max of a measurement file")]
struct Cli {
    /// Path to the measurement file
    file: PathBuf,

    /// Number of worker threads (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Per-worker read buffer size in bytes
    #[arg(long, default_value_t = 12 * 1024 * 1024)]
    read_buffer_size: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = SummaryConfig::new()
        .with_workers(cli.workers)
        .with_read_buffer_size(cli.read_buffer_size);

    let source = FileSource::open(&cli.file)
        .with_context(|| format!("failed to open {}", cli.file.display()))?;

    let started = Instant::now();
    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(OUT_BUFFER_SIZE, stdout.lock());
    summarize(&source, &mut out, &config)
        .with_context(|| format!("failed to summarize {}", cli.file.display()))?;
    out.flush().context("failed to flush summary")?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        workers = config.effective_workers(),
        "summary complete"
    );
    Ok(())
}
