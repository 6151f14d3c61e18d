//! Skewed duplication around one hot record.

use crate::unique_count;
use cdnlog_record::{pools, synthesize, trace_id_with_suffix, LogRecord};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Spacing between consecutive unique records.
const UNIQUE_SPACING_SECS: i64 = 2;

/// Request path of the hot record.
const HOT_PATH: &str = "/prod/client/hot/popular-game-asset.pak";

/// Compose `total` records where one "hot" record appears once within the
/// unique portion and then fills every duplicate slot. With `U` unique
/// records, exactly `total - U + 1` emitted records share the hot dedup
/// key. The sequence is shuffled before returning.
pub fn hot_key<R: Rng>(
    rng: &mut R,
    base: DateTime<Utc>,
    total: usize,
    duplicate_rate: f64,
) -> Vec<LogRecord> {
    if total == 0 {
        return Vec::new();
    }
    let unique = unique_count(total, duplicate_rate);

    let hot = synthesize(
        rng,
        base,
        HOT_PATH,
        pools::CLIENT_ADDRS[0],
        trace_id_with_suffix("hot-asset-repeated"),
        pools::HOT_RESPONSE_SIZE,
    );

    let mut out = Vec::with_capacity(total);
    out.push(hot.clone());
    for i in 1..unique {
        let ts = base + Duration::seconds(i as i64 * UNIQUE_SPACING_SECS);
        let path = format!("/prod/client/unique/asset-{i:06}.json");
        let client = pools::CLIENT_ADDRS[rng.random_range(0..pools::CLIENT_ADDRS.len())];
        let trace = trace_id_with_suffix(&format!("unique-{i:06}"));
        out.push(synthesize(
            rng,
            ts,
            &path,
            client,
            trace,
            pools::DEFAULT_RESPONSE_SIZE,
        ));
    }
    for _ in 0..(total - unique) {
        out.push(hot.clone());
    }

    out.shuffle(rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn base() -> DateTime<Utc> {
        cdnlog_record::parse_start_time("21/Aug/2025:15:05:11 +0000").unwrap()
    }

    #[test]
    fn hot_key_share_is_total_minus_unique_plus_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let total = 10_000;
        let records = hot_key(&mut rng, base(), total, 0.9);
        assert_eq!(records.len(), total);

        // float truncation makes this 999, not 1000
        let unique = unique_count(total, 0.9);
        let mut counts: std::collections::HashMap<String, usize> = Default::default();
        for r in &records {
            *counts.entry(r.dedup_key()).or_default() += 1;
        }
        let hot_count = counts.values().max().copied().unwrap();
        assert_eq!(hot_count, total - unique + 1);
        assert_eq!(counts.len(), unique);
    }

    #[test]
    fn hot_record_has_the_large_response_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = hot_key(&mut rng, base(), 100, 0.5);
        let hot: Vec<_> = records
            .iter()
            .filter(|r| r.trace_id.contains("hot-asset-repeated"))
            .collect();
        assert_eq!(hot.len(), 51);
        for r in hot {
            assert_eq!(r.response_size, pools::HOT_RESPONSE_SIZE);
        }
    }

    #[test]
    fn rate_one_is_all_hot() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = hot_key(&mut rng, base(), 25, 1.0);
        let keys: HashSet<_> = records.iter().map(|r| r.dedup_key()).collect();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn zero_total_is_empty() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(hot_key(&mut rng, base(), 0, 0.9).is_empty());
    }
}
