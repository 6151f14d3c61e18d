//! Error types for the batch writer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a write run.
///
/// Per-file I/O failures are deliberately not represented here: they are
/// logged with the offending filename and the run continues.
#[derive(Debug, Error)]
pub enum WriterError {
    /// Output or batch directory could not be created. Fatal.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Memory utilization stayed above the critical mark. Fatal by policy.
    #[error(
        "memory utilization {used_percent:.1}% above the critical mark; \
         aborting (pass --force to continue anyway)"
    )]
    ResourceExhausted { used_percent: f32 },

    /// Other fatal I/O error (renumbering pass, verification read).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
