//! Lazy record stream for bulk generation.
//!
//! `RecordStream` yields records one at a time with the timestamp advancing
//! by a fixed interval, so the batch writer can split millions of records
//! into files without the whole sequence ever being in memory.

use crate::pools;
use crate::record::{synthesize, LogRecord};
use crate::trace::trace_id;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Iterator producing `count` records spaced `interval` apart.
///
/// Paths and client addresses rotate through the fixed pools; every record
/// gets a fresh random trace id, so the stream contains no deliberate
/// duplicates.
pub struct RecordStream<R: Rng> {
    rng: R,
    current: DateTime<Utc>,
    interval: Duration,
    remaining: u64,
}

impl<R: Rng> RecordStream<R> {
    pub fn new(rng: R, start: DateTime<Utc>, interval: Duration, count: u64) -> Self {
        Self {
            rng,
            current: start,
            interval,
            remaining: count,
        }
    }
}

impl<R: Rng> Iterator for RecordStream<R> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let path = pools::REQUEST_PATHS[self.rng.random_range(0..pools::REQUEST_PATHS.len())];
        let client = pools::CLIENT_ADDRS[self.rng.random_range(0..pools::CLIENT_ADDRS.len())];
        let record = synthesize(
            &mut self.rng,
            self.current,
            path,
            client,
            trace_id(),
            pools::DEFAULT_RESPONSE_SIZE,
        );
        self.current += self.interval;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}
