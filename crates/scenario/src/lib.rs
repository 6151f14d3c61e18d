//! Scenario composers for dedup-pipeline QA.
//!
//! Each module exposes one operation that arranges synthesized records into
//! a test pattern probing one behavior of the external dedup system:
//!
//! - [`uniform`] - random duplicates at a declared rate
//! - [`cross_group`] - keys shared across independently-generated groups
//! - [`hot_key`] - one record repeated for most of the sequence
//! - [`boundary`] - identical key fields at two timestamps, offset apart
//!
//! Composers are pure functions over an explicit RNG and base timestamp;
//! they never touch the filesystem. Duplicates are produced by cloning an
//! already-synthesized record, which is what guarantees byte-identical key
//! fields.

pub mod boundary;
pub mod cross_group;
pub mod hot_key;
pub mod uniform;

pub use boundary::boundary;
pub use cross_group::cross_group;
pub use hot_key::hot_key;
pub use uniform::uniform;

/// Unique-record count for a total and duplicate rate.
///
/// `floor(total * (1 - rate))`, clamped so a nonzero total always has at
/// least one unique record to resample from (a rate of 1.0 repeats a single
/// record for the whole sequence).
pub(crate) fn unique_count(total: usize, duplicate_rate: f64) -> usize {
    let unique = (total as f64 * (1.0 - duplicate_rate)).floor() as usize;
    unique.clamp(usize::from(total > 0), total)
}
