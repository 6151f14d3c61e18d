//! Post-generation verification pass.

use crate::error::WriterError;
use crate::{dir_for, file_name};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Outcome of re-checking an output tree.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub expected_files: usize,
    pub found_files: usize,
    pub total_records: u64,
    pub total_bytes: u64,
    /// File names (relative to the base directory) that were expected but
    /// not found.
    pub missing: Vec<String>,
}

impl VerifyReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Re-open every expected file, count its record lines (non-blank and not a
/// `#` comment header), and report totals plus any missing files.
///
/// An unreadable file is reported with a warning and counted as found with
/// zero records; only filesystem enumeration failures are fatal.
pub fn verify(
    base: &Path,
    prefix: &str,
    expected_files: usize,
    compress: bool,
    files_per_dir: usize,
) -> Result<VerifyReport, WriterError> {
    let mut report = VerifyReport {
        expected_files,
        ..VerifyReport::default()
    };

    for index in 1..=expected_files {
        let dir = dir_for(base, index, files_per_dir);
        let name = file_name(prefix, index, compress);
        let path = dir.join(&name);

        if !path.is_file() {
            let relative = path
                .strip_prefix(base)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or(name);
            report.missing.push(relative);
            continue;
        }

        report.found_files += 1;
        match count_records(&path, compress) {
            Ok((records, bytes)) => {
                report.total_records += records;
                report.total_bytes += bytes;
            }
            Err(e) => warn!("could not read {}: {e}", path.display()),
        }
    }

    info!(
        "verified {}/{} files: {} records, {} bytes",
        report.found_files, report.expected_files, report.total_records, report.total_bytes
    );
    if !report.missing.is_empty() {
        warn!("{} expected files are missing", report.missing.len());
    }
    Ok(report)
}

fn count_records(path: &Path, compress: bool) -> io::Result<(u64, u64)> {
    let bytes = fs::metadata(path)?.len();
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if compress {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut records = 0u64;
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            records += 1;
        }
    }
    Ok((records, bytes))
}
