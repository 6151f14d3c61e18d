//! Fixed-size batching of a record sequence into numbered files.

use crate::error::WriterError;
use crate::memory::MemoryGuard;
use crate::{dir_for, file_name, DEFAULT_BUFFER_SIZE};
use cdnlog_record::LogRecord;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Default output file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "qatest_";

/// Writer configuration. One value per output run; never mutated while a
/// run is in flight.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Base output directory; created if absent.
    pub output_dir: PathBuf,
    /// File name prefix before the zero-padded index.
    pub file_prefix: String,
    /// Records per file; every file is full except possibly the last.
    pub records_per_file: usize,
    /// Files per `batch_NNN` subdirectory; 0 keeps the layout flat.
    pub files_per_dir: usize,
    /// Emit `.log.gz` (gzip) instead of plain `.log`.
    pub compress: bool,
    /// Comment header lines written at the top of every file (without the
    /// leading `# `).
    pub headers: Vec<String>,
}

impl SplitConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            records_per_file: 100,
            files_per_dir: 0,
            compress: true,
            headers: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_records_per_file(mut self, records_per_file: usize) -> Self {
        self.records_per_file = records_per_file;
        self
    }

    pub fn with_files_per_dir(mut self, files_per_dir: usize) -> Self {
        self.files_per_dir = files_per_dir;
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }
}

/// Counters from one write run.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    pub files_written: u64,
    pub files_failed: u64,
    pub records_written: u64,
    pub bytes_written: u64,
    pub total_duration: Duration,
}

impl WriteMetrics {
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Sequential batch writer. One file is fully written and closed before the
/// next begins; the only cross-file state is the global file index.
pub struct SplitWriter {
    config: SplitConfig,
    memory: MemoryGuard,
}

impl SplitWriter {
    pub fn new(config: SplitConfig) -> Self {
        Self {
            config,
            memory: MemoryGuard::disabled(),
        }
    }

    /// Enable the memory-pressure check before each directory group.
    pub fn with_memory_guard(mut self, guard: MemoryGuard) -> Self {
        self.memory = guard;
        self
    }

    /// Consume `records` and write them out in batches.
    ///
    /// A per-file I/O failure is logged with the filename and skipped; a
    /// directory-creation failure or a tripped memory guard aborts.
    pub fn write(
        &self,
        records: impl IntoIterator<Item = LogRecord>,
    ) -> Result<WriteMetrics, WriterError> {
        let start = Instant::now();
        fs::create_dir_all(&self.config.output_dir).map_err(|source| WriterError::CreateDir {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let batch_size = self.config.records_per_file.max(1);
        let files_per_dir = self.config.files_per_dir;
        let mut metrics = WriteMetrics::default();
        let mut iter = records.into_iter();
        let mut global = 0usize;
        // Directory group currently being filled (hierarchical layout only).
        let mut open_dir: Option<(usize, PathBuf)> = None;

        loop {
            let batch: Vec<LogRecord> = iter.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }
            global += 1;

            let (dir, local_index) = if files_per_dir == 0 {
                (self.config.output_dir.clone(), global)
            } else {
                let dir_index = (global - 1) / files_per_dir + 1;
                let local_index = (global - 1) % files_per_dir + 1;
                match &open_dir {
                    Some((open, path)) if *open == dir_index => (path.clone(), local_index),
                    _ => {
                        if let Some((finished, path)) = open_dir.take() {
                            self.renumber(&path, finished)?;
                        }
                        self.memory.check()?;
                        let path = dir_for(&self.config.output_dir, global, files_per_dir);
                        fs::create_dir_all(&path).map_err(|source| WriterError::CreateDir {
                            path: path.clone(),
                            source,
                        })?;
                        debug!("opened directory group {}", path.display());
                        open_dir = Some((dir_index, path.clone()));
                        (path, local_index)
                    }
                }
            };

            let name = file_name(&self.config.file_prefix, local_index, self.config.compress);
            let path = dir.join(&name);
            match self.write_one(&path, &batch) {
                Ok(bytes) => {
                    metrics.files_written += 1;
                    metrics.records_written += batch.len() as u64;
                    metrics.bytes_written += bytes;
                    debug!(
                        "wrote {} ({} records, {} bytes)",
                        path.display(),
                        batch.len(),
                        bytes
                    );
                }
                Err(e) => {
                    error!("failed to write {}: {e}", path.display());
                    metrics.files_failed += 1;
                }
            }

            if metrics.files_written % 1000 == 0 && metrics.files_written > 0 {
                info!(
                    "progress: {} files, {} records",
                    metrics.files_written, metrics.records_written
                );
            }
        }

        if let Some((finished, path)) = open_dir.take() {
            self.renumber(&path, finished)?;
        }

        metrics.total_duration = start.elapsed();
        info!(
            "write complete: {} files, {} records, {} bytes in {:?} ({:.0} records/sec)",
            metrics.files_written,
            metrics.records_written,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.records_per_second()
        );
        Ok(metrics)
    }

    /// Write one batch to one file, returning the file's size on disk.
    fn write_one(&self, path: &Path, batch: &[LogRecord]) -> io::Result<u64> {
        let file = File::create(path)?;
        if self.config.compress {
            let encoder = GzEncoder::new(file, Compression::default());
            let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, encoder);
            self.write_lines(&mut writer, batch)?;
            writer
                .into_inner()
                .map_err(|e| io::Error::other(e.to_string()))?
                .finish()?;
        } else {
            let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
            self.write_lines(&mut writer, batch)?;
            writer.flush()?;
        }
        Ok(fs::metadata(path)?.len())
    }

    fn write_lines<W: Write>(&self, writer: &mut W, batch: &[LogRecord]) -> io::Result<()> {
        for line in &self.config.headers {
            writeln!(writer, "# {line}")?;
        }
        if !self.config.headers.is_empty() {
            writeln!(writer)?;
        }
        for record in batch {
            writeln!(writer, "{record}")?;
        }
        Ok(())
    }

    /// Rename a finished directory group's locally-numbered files into the
    /// global numbering scheme, keeping global indices contiguous across
    /// directory boundaries.
    fn renumber(&self, dir: &Path, dir_index: usize) -> Result<(), WriterError> {
        let start_global = (dir_index - 1) * self.config.files_per_dir + 1;
        let suffix = if self.config.compress { ".log.gz" } else { ".log" };

        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(&self.config.file_prefix) && name.ends_with(suffix))
            .collect();
        names.sort();

        for (i, name) in names.iter().enumerate() {
            let target = file_name(&self.config.file_prefix, start_global + i, self.config.compress);
            if *name != target {
                fs::rename(dir.join(name), dir.join(&target))?;
            }
        }
        debug!(
            "renumbered {} files in {} from global index {}",
            names.len(),
            dir.display(),
            start_global
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdnlog_record::{parse_start_time, split_quoted_fields, RecordStream};
    use flate2::read::GzDecoder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::{BufRead, BufReader};
    use tempfile::TempDir;

    fn records(n: u64) -> Vec<cdnlog_record::LogRecord> {
        let rng = StdRng::seed_from_u64(42);
        let start = parse_start_time("21/Aug/2025:15:05:11 +0000").unwrap();
        RecordStream::new(rng, start, chrono::Duration::milliseconds(100), n).collect()
    }

    fn read_lines(path: &Path, compress: bool) -> Vec<String> {
        let file = File::open(path).unwrap();
        let reader: Box<dyn BufRead> = if compress {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        reader.lines().map(|l| l.unwrap()).collect()
    }

    fn record_lines(path: &Path, compress: bool) -> Vec<String> {
        read_lines(path, compress)
            .into_iter()
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .collect()
    }

    #[test]
    fn emits_ceil_n_over_b_files_with_partial_last() {
        let dir = TempDir::new().unwrap();
        let writer = SplitWriter::new(
            SplitConfig::new(dir.path())
                .with_records_per_file(10)
                .with_compress(false),
        );
        let metrics = writer.write(records(25)).unwrap();

        assert_eq!(metrics.files_written, 3);
        assert_eq!(metrics.records_written, 25);
        assert_eq!(record_lines(&dir.path().join("qatest_000001.log"), false).len(), 10);
        assert_eq!(record_lines(&dir.path().join("qatest_000002.log"), false).len(), 10);
        assert_eq!(record_lines(&dir.path().join("qatest_000003.log"), false).len(), 5);
    }

    #[test]
    fn exact_multiple_keeps_last_file_full() {
        let dir = TempDir::new().unwrap();
        let writer = SplitWriter::new(
            SplitConfig::new(dir.path())
                .with_records_per_file(10)
                .with_compress(false),
        );
        let metrics = writer.write(records(20)).unwrap();

        assert_eq!(metrics.files_written, 2);
        assert_eq!(record_lines(&dir.path().join("qatest_000002.log"), false).len(), 10);
        assert!(!dir.path().join("qatest_000003.log").exists());
    }

    #[test]
    fn empty_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let writer = SplitWriter::new(SplitConfig::new(dir.path()));
        let metrics = writer.write(records(0)).unwrap();
        assert_eq!(metrics.files_written, 0);
        assert_eq!(metrics.records_written, 0);
    }

    #[test]
    fn headers_precede_records() {
        let dir = TempDir::new().unwrap();
        let writer = SplitWriter::new(
            SplitConfig::new(dir.path())
                .with_records_per_file(5)
                .with_compress(false)
                .with_headers(vec![
                    "uniform dedup scenario - 5 records".to_string(),
                    "expected: cache layer stores 5 dedup keys".to_string(),
                ]),
        );
        writer.write(records(5)).unwrap();

        let lines = read_lines(&dir.path().join("qatest_000001.log"), false);
        assert_eq!(lines[0], "# uniform dedup scenario - 5 records");
        assert_eq!(lines[1], "# expected: cache layer stores 5 dedup keys");
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with('"'));
    }

    #[test]
    fn gzip_output_round_trips() {
        let dir = TempDir::new().unwrap();
        let writer = SplitWriter::new(SplitConfig::new(dir.path()).with_records_per_file(7));
        writer.write(records(7)).unwrap();

        let lines = record_lines(&dir.path().join("qatest_000001.log.gz"), true);
        assert_eq!(lines.len(), 7);
        for line in &lines {
            assert_eq!(split_quoted_fields(line).len(), 29);
        }
    }

    #[test]
    fn hierarchical_layout_keeps_global_numbering_contiguous() {
        let dir = TempDir::new().unwrap();
        let writer = SplitWriter::new(
            SplitConfig::new(dir.path())
                .with_records_per_file(3)
                .with_files_per_dir(4)
                .with_compress(false),
        );
        // 30 records, 3 per file -> 10 files -> batch_001..batch_003
        writer.write(records(30)).unwrap();

        let mut indices = Vec::new();
        for sub in ["batch_001", "batch_002", "batch_003"] {
            let sub_path = dir.path().join(sub);
            assert!(sub_path.is_dir(), "{sub} missing");
            for entry in fs::read_dir(&sub_path).unwrap() {
                let name = entry.unwrap().file_name().into_string().unwrap();
                let index: usize = name
                    .trim_start_matches("qatest_")
                    .trim_end_matches(".log")
                    .parse()
                    .unwrap();
                indices.push(index);
            }
        }
        indices.sort_unstable();
        assert_eq!(indices, (1..=10).collect::<Vec<_>>());

        // directory membership follows the global index
        assert!(dir.path().join("batch_001/qatest_000004.log").exists());
        assert!(dir.path().join("batch_002/qatest_000005.log").exists());
        assert!(dir.path().join("batch_003/qatest_000009.log").exists());
    }

    #[test]
    fn unwritable_output_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "not a directory").unwrap();

        let writer = SplitWriter::new(SplitConfig::new(&blocker));
        let err = writer.write(records(1)).unwrap_err();
        assert!(matches!(err, WriterError::CreateDir { .. }));
    }
}
