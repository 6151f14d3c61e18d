//! Cross-group key sharing.
//!
//! Models several independently-invoked generator runs (one per group)
//! whose outputs partially overlap: a shared prefix reproduces the same
//! dedup keys in every run with the same base time, while the exclusive
//! suffix embeds the group identifier to guarantee non-overlap.

use cdnlog_record::{pools, shared_trace_id, synthesize, trace_id_with_suffix, LogRecord};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Spacing between consecutive records.
const RECORD_SPACING_SECS: i64 = 3;

/// Number of distinct shared asset paths in the fixed pool.
const SHARED_PATH_POOL: usize = 10;

/// Compose `total` records for one group: `floor(total * shared_rate)`
/// shared records first, then group-exclusive records. The sequence is not
/// shuffled; callers writing multiple groups rely on the stable order.
///
/// Shared records are fully deterministic in their key fields (pool-indexed
/// path and client, suffix-derived trace id, fixed per-index timestamp), so
/// two groups generated from the same base time collide byte-for-byte on
/// the shared prefix.
pub fn cross_group<R: Rng>(
    rng: &mut R,
    base: DateTime<Utc>,
    group: &str,
    total: usize,
    shared_rate: f64,
) -> Vec<LogRecord> {
    if total == 0 {
        return Vec::new();
    }
    let shared = ((total as f64) * shared_rate).floor() as usize;
    let shared = shared.min(total);
    let mut out = Vec::with_capacity(total);

    for i in 0..shared {
        let ts = base + Duration::seconds(i as i64 * RECORD_SPACING_SECS);
        let path = format!("/prod/client/shared/asset-{:03}.json", i % SHARED_PATH_POOL);
        let client = pools::CLIENT_ADDRS[i % pools::CLIENT_ADDRS.len()];
        let trace = shared_trace_id(&format!("shared-{i:06}"));
        out.push(synthesize(
            rng,
            ts,
            &path,
            client,
            trace,
            pools::DEFAULT_RESPONSE_SIZE,
        ));
    }

    for i in 0..(total - shared) {
        let ts = base + Duration::seconds((shared + i) as i64 * RECORD_SPACING_SECS);
        let path = format!("/prod/client/{group}/asset-{i:06}.json");
        let client = pools::CLIENT_ADDRS[rng.random_range(0..pools::CLIENT_ADDRS.len())];
        let trace = trace_id_with_suffix(&format!("{group}-{i:06}"));
        out.push(synthesize(
            rng,
            ts,
            &path,
            client,
            trace,
            pools::DEFAULT_RESPONSE_SIZE,
        ));
    }

    out
}
