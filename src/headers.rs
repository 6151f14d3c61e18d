//! Comment-header text for generated files.
//!
//! Every output file opens with a few `#` lines naming the scenario and the
//! behavior the external dedup pipeline is expected to show when fed the
//! file. The expectations mirror the pipeline's three stages: a key-value
//! cache holding dedup keys, a publish step that fires once per new key,
//! and a columnar store that keeps one row per key.

/// Headers for the plain bulk stream.
pub fn split(total: u64, start: &str, interval_secs: f64) -> Vec<String> {
    vec![
        format!("bulk CDN log stream - {total} records from {start}, {interval_secs}s apart"),
        "all records unique; expected: no dedup hits downstream".to_string(),
    ]
}

/// Headers for the uniform-duplication scenario.
pub fn basic(total: usize, unique: usize, duplicate_rate: f64) -> Vec<String> {
    let duplicates = total - unique;
    vec![
        format!(
            "uniform dedup scenario - {total} records, {:.0}% duplicate rate",
            duplicate_rate * 100.0
        ),
        format!("expected: cache layer stores {unique} dedup keys (unique records only)"),
        format!("expected: publish fires {unique} times, skips {duplicates}"),
        format!("expected: columnar store sees {total} write attempts, keeps {unique} rows"),
    ]
}

/// Headers for one group of the cross-group scenario.
pub fn concurrent(group: usize, total: usize, shared_rate: f64) -> Vec<String> {
    vec![
        format!("cross-group dedup scenario - group {group}, {total} records"),
        format!(
            "{:.0}% of records repeat the shared key set of every other group",
            shared_rate * 100.0
        ),
        "expected: shared keys dedup across groups; exclusive keys never collide".to_string(),
    ]
}

/// Headers for the hot-key scenario.
pub fn hot_key(total: usize, unique: usize, duplicate_rate: f64) -> Vec<String> {
    let hot_copies = total - unique + 1;
    vec![
        format!(
            "hot-key dedup scenario - {total} records, {:.0}% duplicate rate",
            duplicate_rate * 100.0
        ),
        format!("one hot record occurs {hot_copies} times; {unique} distinct keys overall"),
        format!("expected: cache layer stores {unique} dedup keys"),
        format!(
            "expected: publish fires {unique} times, skips {}",
            total - unique
        ),
    ]
}

/// Headers for the first boundary batch.
pub fn boundary_first(pairs: usize, offset_minutes: i64) -> Vec<String> {
    vec![
        format!("ttl-boundary scenario - batch 1 of 2, {pairs} records"),
        format!("batch 2 repeats these key fields {offset_minutes} minutes later"),
        "expected: cache keys set, columnar rows written, publish fires".to_string(),
    ]
}

/// Headers for the second boundary batch.
pub fn boundary_second(pairs: usize, offset_minutes: i64) -> Vec<String> {
    vec![
        format!("ttl-boundary scenario - batch 2 of 2, {pairs} records"),
        format!("same trace/client/path as batch 1, timestamps +{offset_minutes} minutes"),
        "expected: cache window expired, records re-published as new".to_string(),
        "expected: columnar store rejects the rewrite; consumers see duplicates".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_headers_carry_the_expected_counts() {
        let lines = basic(1000, 700, 0.3);
        assert!(lines[0].contains("1000 records"));
        assert!(lines[0].contains("30%"));
        assert!(lines[1].contains("700 dedup keys"));
        assert!(lines[2].contains("skips 300"));
    }

    #[test]
    fn hot_key_headers_count_copies() {
        let lines = hot_key(10_000, 1_000, 0.9);
        assert!(lines[1].contains("9001 times"));
    }
}
