//! The `LogRecord` value type and its fixed line format.

use crate::pools;
use crate::time::format_timestamp;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use rand::Rng;
use std::fmt;

/// One synthetic CDN access event.
///
/// Immutable after creation. Cloning is the duplication mechanism: a clone
/// is byte-identical in every field, which is what makes two records
/// collide under the external system's dedup key.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub status: String,
    pub response_time: f64,
    pub connect_time_ms: u32,
    pub response_size: u64,
    pub cache_result: String,
    pub client_ip: String,
    pub port: String,
    pub content_type: String,
    pub user_agent: String,
    pub trace_id: String,
    pub request_id: u32,
    pub request_bytes: u32,
    pub header_bytes: u32,
    pub upstream_time: f64,
}

impl LogRecord {
    /// Dedup key as the external system computes it: MD5 over the
    /// concatenation of trace id, formatted timestamp, client address, and
    /// path. Recomputed on demand, never stored.
    pub fn dedup_key(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.trace_id.as_bytes());
        hasher.update(format_timestamp(self.timestamp).as_bytes());
        hasher.update(self.client_ip.as_bytes());
        hasher.update(self.path.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Display for LogRecord {
    /// The fixed 29-field quoted line format. Field order, quoting, and the
    /// timestamp format are load-bearing for the system under test; do not
    /// reorder.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{ts}\" \"{method}\" \"{scheme}\" \"{host}\" \"{path}\" \
             \"{method} {path} HTTP/1.1\" \"{status}\" \"{rt:.6}\" \"{connect}\" \
             \"{size}\" \"{cache}\" \"{client}\" \"{edge}\" \"{port}\" \"-\" \
             \"{ctype}\" \"{ua}\" \"{trace}\" \"{req_id}\" \"{req_bytes}\" \
             \"{hdr_bytes}\" \"-\" \"{client}\" \"{country}\" \"HTTP/1.1\" \"-\" \
             \"{http_date}\" \"-\" \"{upstream:.6}\"",
            ts = format_timestamp(self.timestamp),
            method = self.method,
            scheme = self.scheme,
            host = self.host,
            path = self.path,
            status = self.status,
            rt = self.response_time,
            connect = self.connect_time_ms,
            size = self.response_size,
            cache = self.cache_result,
            client = self.client_ip,
            edge = pools::EDGE_ADDR,
            port = self.port,
            ctype = self.content_type,
            ua = self.user_agent,
            trace = self.trace_id,
            req_id = self.request_id,
            req_bytes = self.request_bytes,
            hdr_bytes = self.header_bytes,
            country = pools::COUNTRY,
            http_date = pools::HTTP_DATE,
            upstream = self.upstream_time,
        )
    }
}

/// Synthesize one record.
///
/// The four dedup-relevant fields (timestamp, path after prefixing, client
/// address, trace id) are taken verbatim from the caller; the remaining
/// fields come from bounded randomization and the fixed pools. Two calls
/// with identical key inputs still differ in non-key fields, so callers
/// wanting exact duplicates must clone the returned record.
pub fn synthesize<R: Rng>(
    rng: &mut R,
    timestamp: DateTime<Utc>,
    path: &str,
    client_ip: &str,
    trace_id: String,
    response_size: u64,
) -> LogRecord {
    let path = if path.starts_with(pools::TEST_PATH_PREFIX) {
        path.to_string()
    } else {
        format!("{}{}", pools::TEST_PATH_PREFIX, path)
    };
    let base_ua = pools::USER_AGENTS[rng.random_range(0..pools::USER_AGENTS.len())];

    LogRecord {
        timestamp,
        method: "GET".to_string(),
        scheme: "http".to_string(),
        host: pools::TEST_HOST.to_string(),
        path,
        status: "200".to_string(),
        response_time: rng.random_range(0.001..1.0),
        connect_time_ms: rng.random_range(600..=700),
        response_size,
        cache_result: "HIT".to_string(),
        client_ip: client_ip.to_string(),
        port: "80".to_string(),
        content_type: pools::CONTENT_TYPE.to_string(),
        user_agent: format!("{}{}", pools::UA_TEST_MARKER, base_ua),
        trace_id,
        request_id: rng.random_range(10_000..=50_000),
        request_bytes: rng.random_range(25..=500),
        header_bytes: rng.random_range(25..=500),
        upstream_time: rng.random_range(0.001..1.0),
    }
}

/// Split a formatted log line back into its quoted fields.
///
/// Used by the verification pass and tests to check field count and order.
pub fn split_quoted_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find('"') {
        let after = &rest[start + 1..];
        match after.find('"') {
            Some(end) => {
                fields.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_start_time;
    use crate::trace::trace_id_with_suffix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_record(seed: u64) -> LogRecord {
        let mut rng = StdRng::seed_from_u64(seed);
        let ts = parse_start_time("21/Aug/2025:15:05:11 +0000").unwrap();
        synthesize(
            &mut rng,
            ts,
            pools::REQUEST_PATHS[0],
            pools::CLIENT_ADDRS[1],
            trace_id_with_suffix("unique-000000"),
            pools::DEFAULT_RESPONSE_SIZE,
        )
    }

    #[test]
    fn line_has_29_quoted_fields() {
        let record = sample_record(42);
        let line = record.to_string();
        let fields = split_quoted_fields(&line);
        assert_eq!(fields.len(), 29, "line was: {line}");
    }

    #[test]
    fn field_order_matches_synthesis() {
        let record = sample_record(42);
        let line = record.to_string();
        let fields = split_quoted_fields(&line);

        assert_eq!(fields[0], format_timestamp(record.timestamp));
        assert_eq!(fields[1], "GET");
        assert_eq!(fields[2], "http");
        assert_eq!(fields[3], pools::TEST_HOST);
        assert_eq!(fields[4], record.path);
        assert_eq!(fields[5], format!("GET {} HTTP/1.1", record.path));
        assert_eq!(fields[6], "200");
        assert_eq!(fields[8], record.connect_time_ms.to_string());
        assert_eq!(fields[9], record.response_size.to_string());
        assert_eq!(fields[10], "HIT");
        assert_eq!(fields[11], record.client_ip);
        assert_eq!(fields[12], pools::EDGE_ADDR);
        assert_eq!(fields[13], "80");
        assert_eq!(fields[14], "-");
        assert_eq!(fields[15], pools::CONTENT_TYPE);
        assert_eq!(fields[17], record.trace_id);
        assert_eq!(fields[22], record.client_ip);
        assert_eq!(fields[23], pools::COUNTRY);
        assert_eq!(fields[26], pools::HTTP_DATE);
    }

    #[test]
    fn path_is_prefixed_once() {
        let record = sample_record(1);
        assert!(record.path.starts_with("/test-dedup/prod/"));

        let mut rng = StdRng::seed_from_u64(1);
        let ts = parse_start_time("21/Aug/2025:15:05:11 +0000").unwrap();
        let already = synthesize(
            &mut rng,
            ts,
            "/test-dedup/prod/client/x.json",
            pools::CLIENT_ADDRS[0],
            trace_id_with_suffix("x"),
            1,
        );
        assert_eq!(already.path, "/test-dedup/prod/client/x.json");
    }

    #[test]
    fn clones_share_a_dedup_key() {
        let record = sample_record(7);
        let dup = record.clone();
        assert_eq!(record.dedup_key(), dup.dedup_key());
        assert_eq!(record.to_string(), dup.to_string());
    }

    #[test]
    fn regenerated_records_differ_in_non_key_fields() {
        // Same key inputs, separately synthesized: key fields match but the
        // records are not exact duplicates (trace span nonce and randomized
        // fields differ).
        let a = sample_record(3);
        let b = sample_record(4);
        assert_eq!(a.path, b.path);
        assert_eq!(a.client_ip, b.client_ip);
        assert_ne!(a.trace_id, b.trace_id);
    }

    #[test]
    fn dedup_key_is_32_hex_chars() {
        let key = sample_record(9).dedup_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn timing_fields_stay_in_range() {
        for seed in 0..20 {
            let r = sample_record(seed);
            assert!(r.response_time >= 0.001 && r.response_time < 1.0);
            assert!((600..=700).contains(&r.connect_time_ms));
            assert!((10_000..=50_000).contains(&r.request_id));
            assert!((25..=500).contains(&r.request_bytes));
            assert!((25..=500).contains(&r.header_bytes));
        }
    }
}
