//! Command-line interface for cdnlog-gen
//!
//! # Usage Examples
//!
//! ## Bulk split stream
//! ```bash
//! # 350k unique records, 100 per gzip file, flat layout
//! cdnlog-gen split --total-count 350000 --records-per-file 100 \
//!   --start-time "21/Aug/2025:15:05:11 +0000" --interval 0.1 \
//!   --output-dir ./out --verify
//!
//! # 3500 files of 10000 records under batch_NNN subdirectories
//! cdnlog-gen split --total-count 35000000 --records-per-file 10000 \
//!   --files-per-dir 1000 --output-dir ./out
//! ```
//!
//! ## Dedup scenarios
//! ```bash
//! # 1000 records, 30% uniform duplicates
//! cdnlog-gen scenario basic --total 1000 --duplicate-rate 0.3 -o ./out
//!
//! # 5 groups sharing 50% of their keys
//! cdnlog-gen scenario concurrent --groups 5 --total 1000 --shared-rate 0.5 -o ./out
//!
//! # one hot record at 90% duplication
//! cdnlog-gen scenario hotkey --total 10000 --duplicate-rate 0.9 -o ./out
//!
//! # two batches with identical keys 110 minutes apart
//! cdnlog-gen scenario ttl-boundary --pairs 100 --offset-minutes 110 -o ./out
//! ```
//!
//! ## Verification
//! ```bash
//! cdnlog-gen verify --output-dir ./out --expected-files 3500
//! ```

use anyhow::Context;
use cdnlog_gen::{check_rate, headers, stats::RunStats, GenOpts, OutputOpts};
use cdnlog_record::{format_timestamp, RecordStream};
use cdnlog_writer::{verify, VerifyReport, WriteMetrics};
use chrono::Duration;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cdnlog-gen")]
#[command(about = "Synthetic CDN access-log generator for dedup-pipeline QA")]
#[command(long_about = None)]
struct Cli {
    /// Only warnings and errors on stderr (overridden by RUST_LOG)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a unique-record stream split across numbered files
    Split(SplitArgs),

    /// Generate one of the dedup test scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommand),

    /// Re-check an existing output tree against expected file counts
    Verify(VerifyArgs),
}

#[derive(Args)]
struct SplitArgs {
    /// Total record count
    #[arg(long, short = 't', default_value = "350000")]
    total_count: u64,

    /// Seconds between consecutive records (fractional allowed)
    #[arg(long, short = 'i', default_value = "0.1")]
    interval: f64,

    /// Re-open every expected file after generation and report totals
    #[arg(long)]
    verify: bool,

    #[command(flatten)]
    gen: GenOpts,

    #[command(flatten)]
    output: OutputOpts,
}

#[derive(Subcommand)]
enum ScenarioCommand {
    /// Uniform random duplicates at a fixed rate
    Basic {
        /// Total record count
        #[arg(long, default_value = "1000")]
        total: usize,

        /// Fraction of records that duplicate an earlier one (0.0-1.0)
        #[arg(long, default_value = "0.3")]
        duplicate_rate: f64,

        #[command(flatten)]
        gen: GenOpts,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// Per-group sequences sharing a deterministic key prefix
    Concurrent {
        /// Number of independently-written groups
        #[arg(long, default_value = "5")]
        groups: usize,

        /// Records per group
        #[arg(long, default_value = "1000")]
        total: usize,

        /// Fraction of each group's records drawn from the shared pool
        #[arg(long, default_value = "0.5")]
        shared_rate: f64,

        #[command(flatten)]
        gen: GenOpts,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// One hot record dominating the sequence
    Hotkey {
        /// Total record count
        #[arg(long, default_value = "10000")]
        total: usize,

        /// Fraction of records that repeat the hot record (0.0-1.0)
        #[arg(long, default_value = "0.9")]
        duplicate_rate: f64,

        #[command(flatten)]
        gen: GenOpts,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// Identical key fields emitted at two timestamps an offset apart
    TtlBoundary {
        /// Number of record pairs
        #[arg(long, default_value = "100")]
        pairs: usize,

        /// Minutes between the two batches
        #[arg(long, default_value = "110")]
        offset_minutes: i64,

        #[command(flatten)]
        gen: GenOpts,

        #[command(flatten)]
        output: OutputOpts,
    },
}

#[derive(Args)]
struct VerifyArgs {
    /// Directory holding the generated files
    #[arg(long, short = 'o')]
    output_dir: PathBuf,

    /// File name prefix
    #[arg(long, short = 'p', default_value = "qatest_")]
    prefix: String,

    /// Number of files the run should have produced
    #[arg(long)]
    expected_files: usize,

    /// Files per batch_NNN subdirectory used at generation time (0 = flat)
    #[arg(long, default_value = "0")]
    files_per_dir: usize,

    /// Files are plain .log instead of .log.gz
    #[arg(long)]
    no_compress: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(if cli.quiet { "warn" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Split(args) => run_split(args),
        Commands::Scenario(scenario) => run_scenario(scenario),
        Commands::Verify(args) => {
            let report = verify(
                &args.output_dir,
                &args.prefix,
                args.expected_files,
                !args.no_compress,
                args.files_per_dir,
            )?;
            report_verification(&report);
            Ok(())
        }
    }
}

fn run_split(args: SplitArgs) -> anyhow::Result<()> {
    let start = args.gen.resolve_start(Duration::zero())?;
    anyhow::ensure!(args.interval > 0.0, "--interval must be positive");
    let interval = Duration::microseconds((args.interval * 1e6).round() as i64);

    info!(
        "generating {} records from {} ({}s apart) into {}",
        args.total_count,
        format_timestamp(start),
        args.interval,
        args.output.output_dir.display()
    );

    let mut stats = RunStats::new();
    let stream = RecordStream::new(args.gen.rng(), start, interval, args.total_count);
    let writer = args.output.split_writer(headers::split(
        args.total_count,
        &format_timestamp(start),
        args.interval,
    ));
    let metrics = writer.write(stream.inspect(|r| stats.observe(r)))?;

    report_write(&metrics);
    stats.report();

    if args.verify {
        let batch = args.output.records_per_file.max(1) as u64;
        let expected = usize::try_from(args.total_count.div_ceil(batch))?;
        let report = verify(
            &args.output.output_dir,
            &args.output.prefix,
            expected,
            !args.output.no_compress,
            args.output.files_per_dir,
        )?;
        report_verification(&report);
    }
    Ok(())
}

fn run_scenario(scenario: ScenarioCommand) -> anyhow::Result<()> {
    // Scenario timestamps sit half an hour in the past so the records land
    // inside the pipeline's processing window with room to run the test.
    let window_offset = Duration::minutes(30);

    match scenario {
        ScenarioCommand::Basic {
            total,
            duplicate_rate,
            gen,
            output,
        } => {
            check_rate("duplicate-rate", duplicate_rate)?;
            let base = gen.resolve_start(window_offset)?;
            let mut rng = gen.rng();

            let records = cdnlog_scenario::uniform(&mut rng, base, total, duplicate_rate);
            let mut stats = RunStats::new();
            records.iter().for_each(|r| stats.observe(r));
            let unique = stats.distinct_dedup_keys();

            info!("uniform scenario: {total} records, {unique} unique");
            let writer = output.split_writer(headers::basic(total, unique, duplicate_rate));
            report_write(&writer.write(records)?);
            stats.report();
        }

        ScenarioCommand::Concurrent {
            groups,
            total,
            shared_rate,
            gen,
            output,
        } => {
            check_rate("shared-rate", shared_rate)?;
            anyhow::ensure!(groups > 0, "--groups must be at least 1");
            let base = gen.resolve_start(window_offset)?;
            let mut rng = gen.rng();
            let mut stats = RunStats::new();

            for group in 1..=groups {
                let name = format!("group{group}");
                let records =
                    cdnlog_scenario::cross_group(&mut rng, base, &name, total, shared_rate);
                records.iter().for_each(|r| stats.observe(r));

                let group_output = with_prefix(&output, format!("{}{name}_", output.prefix));
                info!("cross-group scenario: writing {name} ({total} records)");
                let writer =
                    group_output.split_writer(headers::concurrent(group, total, shared_rate));
                report_write(&writer.write(records)?);
            }
            stats.report();
        }

        ScenarioCommand::Hotkey {
            total,
            duplicate_rate,
            gen,
            output,
        } => {
            check_rate("duplicate-rate", duplicate_rate)?;
            let base = gen.resolve_start(window_offset)?;
            let mut rng = gen.rng();

            let records = cdnlog_scenario::hot_key(&mut rng, base, total, duplicate_rate);
            let mut stats = RunStats::new();
            records.iter().for_each(|r| stats.observe(r));
            let unique = stats.distinct_dedup_keys();

            info!("hot-key scenario: {total} records, {unique} unique");
            let writer = output.split_writer(headers::hot_key(total, unique, duplicate_rate));
            report_write(&writer.write(records)?);
            stats.report();
        }

        ScenarioCommand::TtlBoundary {
            pairs,
            offset_minutes,
            gen,
            output,
        } => {
            anyhow::ensure!(offset_minutes > 0, "--offset-minutes must be positive");
            // First batch sits a full offset before the usual window base so
            // the second batch still lands inside the processing window.
            let first_base = gen
                .resolve_start(window_offset + Duration::minutes(offset_minutes))
                .context("resolving the first batch's base time")?;
            let offset = Duration::minutes(offset_minutes);
            let mut rng = gen.rng();

            let (first, second) = cdnlog_scenario::boundary(&mut rng, first_base, offset, pairs);
            let mut stats = RunStats::new();
            first.iter().chain(second.iter()).for_each(|r| stats.observe(r));

            info!("ttl-boundary scenario: {pairs} pairs, {offset_minutes} minutes apart");
            let batch1 = with_prefix(&output, format!("{}boundary1_", output.prefix));
            let writer = batch1.split_writer(headers::boundary_first(pairs, offset_minutes));
            report_write(&writer.write(first)?);

            let batch2 = with_prefix(&output, format!("{}boundary2_", output.prefix));
            let writer = batch2.split_writer(headers::boundary_second(pairs, offset_minutes));
            report_write(&writer.write(second)?);
            stats.report();
        }
    }
    Ok(())
}

fn with_prefix(output: &OutputOpts, prefix: String) -> OutputOpts {
    let mut output = output.clone();
    output.prefix = prefix;
    output
}

fn report_write(metrics: &WriteMetrics) {
    if metrics.files_failed > 0 {
        warn!("{} files failed to write and were skipped", metrics.files_failed);
    }
}

fn report_verification(report: &VerifyReport) {
    info!(
        "verification: {}/{} files, {} records, {} bytes",
        report.found_files, report.expected_files, report.total_records, report.total_bytes
    );
    if report.is_complete() {
        info!("all expected files are present");
    } else {
        for name in &report.missing {
            warn!("missing file: {name}");
        }
    }
}
