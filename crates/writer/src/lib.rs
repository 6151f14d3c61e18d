//! Batch writer for synthetic CDN log files.
//!
//! Takes a record sequence (eager or lazy) and persists it as numbered,
//! optionally gzip-compressed files:
//!
//! - every file holds exactly `records_per_file` records except the last;
//! - file names carry a 1-based, zero-padded global index whose
//!   lexicographic order matches generation order;
//! - with `files_per_dir > 0`, files are grouped under `batch_NNN`
//!   subdirectories and renumbered back into the global scheme, so global
//!   indices stay contiguous across directory boundaries;
//! - a failed file is logged and skipped, a failed directory aborts the
//!   run, and a memory-pressure check runs before each directory group.
//!
//! [`verify`] re-opens an output tree and reports record totals and any
//! missing files.

mod error;
mod memory;
mod split;
mod verify;

pub use error::WriterError;
pub use memory::MemoryGuard;
pub use split::{SplitConfig, SplitWriter, WriteMetrics, DEFAULT_FILE_PREFIX};
pub use verify::{verify, VerifyReport};

use std::path::{Path, PathBuf};

/// Buffer size for file writes (matches the CSV populator's default scale).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// File name for a given index: `{prefix}{index:06}.log` or `.log.gz`.
pub(crate) fn file_name(prefix: &str, index: usize, compress: bool) -> String {
    if compress {
        format!("{prefix}{index:06}.log.gz")
    } else {
        format!("{prefix}{index:06}.log")
    }
}

/// Directory a global file index lands in, given the layout.
pub(crate) fn dir_for(base: &Path, global_index: usize, files_per_dir: usize) -> PathBuf {
    if files_per_dir == 0 {
        base.to_path_buf()
    } else {
        let dir_index = (global_index - 1) / files_per_dir + 1;
        base.join(format!("batch_{dir_index:03}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(file_name("qatest_", 1, true), "qatest_000001.log.gz");
        assert_eq!(file_name("qatest_", 42, false), "qatest_000042.log");
    }

    #[test]
    fn file_names_sort_lexicographically() {
        let names: Vec<_> = (1..=1200).map(|i| file_name("t_", i, true)).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn directory_assignment() {
        let base = Path::new("/out");
        assert_eq!(dir_for(base, 1, 0), Path::new("/out"));
        assert_eq!(dir_for(base, 1, 4), Path::new("/out/batch_001"));
        assert_eq!(dir_for(base, 4, 4), Path::new("/out/batch_001"));
        assert_eq!(dir_for(base, 5, 4), Path::new("/out/batch_002"));
        assert_eq!(dir_for(base, 9, 4), Path::new("/out/batch_003"));
    }
}
