//! Uniform random duplication.

use crate::unique_count;
use cdnlog_record::{pools, synthesize, trace_id_with_suffix, LogRecord};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Spacing between consecutive unique records.
const UNIQUE_SPACING_SECS: i64 = 5;

/// Compose `total` records of which `floor(total * (1 - duplicate_rate))`
/// are unique; every remaining slot is a clone of a uniformly resampled
/// unique record. The full sequence is shuffled so consumers cannot infer
/// generation order.
pub fn uniform<R: Rng>(
    rng: &mut R,
    base: DateTime<Utc>,
    total: usize,
    duplicate_rate: f64,
) -> Vec<LogRecord> {
    if total == 0 {
        return Vec::new();
    }
    let unique = unique_count(total, duplicate_rate);

    let mut uniques = Vec::with_capacity(unique);
    for i in 0..unique {
        let ts = base + Duration::seconds(i as i64 * UNIQUE_SPACING_SECS);
        let path = pools::REQUEST_PATHS[rng.random_range(0..pools::REQUEST_PATHS.len())];
        let client = pools::CLIENT_ADDRS[rng.random_range(0..pools::CLIENT_ADDRS.len())];
        let trace = trace_id_with_suffix(&format!("unique-{i:06}"));
        uniques.push(synthesize(
            rng,
            ts,
            path,
            client,
            trace,
            pools::DEFAULT_RESPONSE_SIZE,
        ));
    }

    let mut out = uniques.clone();
    for _ in 0..(total - unique) {
        let pick = rng.random_range(0..uniques.len());
        out.push(uniques[pick].clone());
    }

    out.shuffle(rng);
    out
}
