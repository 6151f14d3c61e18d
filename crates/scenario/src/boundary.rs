//! Time-boundary pairing.
//!
//! Probes the external system's time-window expiry: the second batch
//! repeats the first batch's key fields at timestamps shifted by the
//! caller's offset. Pairs correspond by index; neither batch is shuffled.

use cdnlog_record::{pools, synthesize, trace_id_with_suffix, LogRecord};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Spacing between consecutive pairs within each batch.
const PAIR_SPACING_SECS: i64 = 5;

/// Compose two equal-length batches of `pairs` records. For every index i,
/// both batches share trace id, client address, and path; only the
/// timestamps differ, by exactly `offset`.
pub fn boundary<R: Rng>(
    rng: &mut R,
    first_base: DateTime<Utc>,
    offset: Duration,
    pairs: usize,
) -> (Vec<LogRecord>, Vec<LogRecord>) {
    let mut first = Vec::with_capacity(pairs);
    let mut second = Vec::with_capacity(pairs);

    for i in 0..pairs {
        let ts1 = first_base + Duration::seconds(i as i64 * PAIR_SPACING_SECS);
        let ts2 = ts1 + offset;
        let path = format!("/prod/client/ttl-test/asset-boundary-{i:03}.json");
        let client = pools::CLIENT_ADDRS[i % pools::CLIENT_ADDRS.len()];
        let trace = trace_id_with_suffix(&format!("ttl-boundary-{i:03}"));

        first.push(synthesize(
            rng,
            ts1,
            &path,
            client,
            trace.clone(),
            pools::DEFAULT_RESPONSE_SIZE,
        ));
        second.push(synthesize(
            rng,
            ts2,
            &path,
            client,
            trace,
            pools::DEFAULT_RESPONSE_SIZE,
        ));
    }

    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base() -> DateTime<Utc> {
        cdnlog_record::parse_start_time("21/Aug/2025:15:05:11 +0000").unwrap()
    }

    #[test]
    fn pairs_share_key_fields_except_timestamp() {
        let mut rng = StdRng::seed_from_u64(42);
        let offset = Duration::minutes(110);
        let (first, second) = boundary(&mut rng, base(), offset, 100);

        assert_eq!(first.len(), 100);
        assert_eq!(second.len(), 100);
        for i in 0..100 {
            assert_eq!(first[i].trace_id, second[i].trace_id);
            assert_eq!(first[i].client_ip, second[i].client_ip);
            assert_eq!(first[i].path, second[i].path);
            assert_eq!(second[i].timestamp - first[i].timestamp, offset);
        }
    }

    #[test]
    fn timestamps_differ_so_keys_differ() {
        // The dedup key covers the timestamp, so pair members hash apart;
        // only a system that expires its window treats batch two as new.
        let mut rng = StdRng::seed_from_u64(42);
        let (first, second) = boundary(&mut rng, base(), Duration::minutes(80), 10);
        for i in 0..10 {
            assert_ne!(first[i].dedup_key(), second[i].dedup_key());
        }
    }

    #[test]
    fn zero_pairs_is_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let (first, second) = boundary(&mut rng, base(), Duration::minutes(1), 0);
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn batches_are_not_interleaved_or_shuffled() {
        let mut rng = StdRng::seed_from_u64(42);
        let (first, _) = boundary(&mut rng, base(), Duration::minutes(1), 5);
        for (i, r) in first.iter().enumerate() {
            assert!(r.trace_id.contains(&format!("ttl-boundary-{i:03}")));
        }
    }
}
