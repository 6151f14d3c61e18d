//! Timestamp parsing and formatting for the log line format.
//!
//! The on-wire form is `DD/Mon/YYYY:HH:MM:SS +0000` (always UTC). Parsing
//! is strict: anything that does not match fails fast with a descriptive
//! error so the CLI can exit nonzero before any file is written.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// strftime pattern used for parsing (`%z` accepts the `+0000` suffix).
const PARSE_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Error for unparseable start-time strings.
#[derive(Debug, Error)]
#[error("invalid start time '{input}': expected format DD/Mon/YYYY:HH:MM:SS +0000")]
pub struct TimeFormatError {
    /// The offending input string.
    pub input: String,
}

/// Parse a start-time string in the log's timestamp format.
pub fn parse_start_time(input: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    DateTime::parse_from_str(input, PARSE_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeFormatError {
            input: input.to_string(),
        })
}

/// Format a timestamp exactly as it appears in the first log field.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%d/%b/%Y:%H:%M:%S +0000").to_string()
}
