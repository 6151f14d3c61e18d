//! cdnlog-gen library surface.
//!
//! Shared CLI option groups plus the run-statistics collector. The actual
//! generation logic lives in the workspace crates: `cdnlog-record`
//! (synthesis), `cdnlog-scenario` (test patterns), `cdnlog-writer`
//! (batching and files). This crate only wires them to flags and keeps the
//! incidental bookkeeping out of those cores.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

pub mod headers;
pub mod stats;

pub use cdnlog_record as record;
pub use cdnlog_scenario as scenario;
pub use cdnlog_writer as writer;

/// Output placement and batching flags shared by every generating command.
#[derive(Args, Clone, Debug)]
pub struct OutputOpts {
    /// Output directory (created if absent)
    #[arg(long, short = 'o', default_value = "./cdnlog-out")]
    pub output_dir: PathBuf,

    /// File name prefix before the zero-padded index
    #[arg(long, short = 'p', default_value = "qatest_")]
    pub prefix: String,

    /// Records per output file
    #[arg(long, short = 'r', default_value = "100")]
    pub records_per_file: usize,

    /// Group files into batch_NNN subdirectories of this many files
    /// (0 = flat layout)
    #[arg(long, default_value = "0")]
    pub files_per_dir: usize,

    /// Write plain .log files instead of gzip .log.gz
    #[arg(long)]
    pub no_compress: bool,

    /// Continue past the critical memory mark instead of aborting
    #[arg(long)]
    pub force: bool,
}

impl OutputOpts {
    /// Writer configuration for this command invocation.
    pub fn split_config(&self, headers: Vec<String>) -> writer::SplitConfig {
        writer::SplitConfig::new(&self.output_dir)
            .with_prefix(&self.prefix)
            .with_records_per_file(self.records_per_file)
            .with_files_per_dir(self.files_per_dir)
            .with_compress(!self.no_compress)
            .with_headers(headers)
    }

    /// Writer with the memory guard enabled for hierarchical runs.
    pub fn split_writer(&self, headers: Vec<String>) -> writer::SplitWriter {
        let split = writer::SplitWriter::new(self.split_config(headers));
        if self.files_per_dir > 0 {
            split.with_memory_guard(writer::MemoryGuard::new(self.force))
        } else {
            split
        }
    }
}

/// Generation flags shared by every generating command.
#[derive(Args, Clone, Debug)]
pub struct GenOpts {
    /// Start timestamp (DD/Mon/YYYY:HH:MM:SS +0000); defaults to the
    /// current time shifted by the command's window offset
    #[arg(long, short = 's')]
    pub start_time: Option<String>,

    /// Random seed for reproducible runs (same seed = same data)
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

impl GenOpts {
    /// Resolve the base timestamp, falling back to `now - default_offset`.
    ///
    /// An unparseable `--start-time` is fatal before any file is written.
    pub fn resolve_start(&self, default_offset: Duration) -> anyhow::Result<DateTime<Utc>> {
        match &self.start_time {
            Some(input) => {
                record::parse_start_time(input).context("unusable --start-time value")
            }
            None => Ok(Utc::now() - default_offset),
        }
    }

    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

/// Validate a rate-style flag (duplicate rate, shared rate).
pub fn check_rate(name: &str, value: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&value),
        "--{name} must be between 0.0 and 1.0 (got {value})"
    );
    Ok(())
}
