//! Synthetic CDN access-log records for dedup-pipeline QA.
//!
//! This crate provides the `LogRecord` value type and the field generators
//! used to synthesize it. A record serializes to a fixed 29-field,
//! double-quote-delimited log line. The four fields an external
//! deduplication system hashes into its key (trace id, timestamp, client
//! address, and request path) are caller-supplied; everything else is
//! filled from bounded randomization and fixed pools.
//!
//! Records are immutable values: callers that want two colliding records
//! clone one `LogRecord` rather than re-synthesizing from the same inputs,
//! because the non-key fields are randomized per call.
//!
//! # Example
//!
//! ```rust
//! use cdnlog_record::{parse_start_time, synthesize, trace_id_with_suffix, pools};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let ts = parse_start_time("21/Aug/2025:15:05:11 +0000").unwrap();
//! let record = synthesize(
//!     &mut rng,
//!     ts,
//!     pools::REQUEST_PATHS[0],
//!     pools::CLIENT_ADDRS[0],
//!     trace_id_with_suffix("unique-000000"),
//!     pools::DEFAULT_RESPONSE_SIZE,
//! );
//! assert_eq!(record.dedup_key().len(), 32);
//! ```

pub mod pools;
pub mod record;
pub mod stream;
pub mod time;
pub mod trace;

pub use record::{split_quoted_fields, synthesize, LogRecord};
pub use stream::RecordStream;
pub use time::{format_timestamp, parse_start_time, TimeFormatError};
pub use trace::{shared_trace_id, trace_id, trace_id_with_suffix};
