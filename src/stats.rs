//! End-of-run uniqueness statistics.
//!
//! Human-readable bookkeeping only; generation correctness never depends on
//! it, which is why it lives here and not in the generator crates. Records
//! flow through via `Iterator::inspect` so the writer still consumes the
//! sequence lazily.

use cdnlog_record::LogRecord;
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Default)]
pub struct RunStats {
    records: u64,
    clients: HashSet<String>,
    trace_ids: HashSet<String>,
    dedup_keys: HashSet<String>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &LogRecord) {
        self.records += 1;
        self.clients.insert(record.client_ip.clone());
        self.trace_ids.insert(record.trace_id.clone());
        self.dedup_keys.insert(record.dedup_key());
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn distinct_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn distinct_trace_ids(&self) -> usize {
        self.trace_ids.len()
    }

    pub fn distinct_dedup_keys(&self) -> usize {
        self.dedup_keys.len()
    }

    /// Log the uniqueness summary.
    pub fn report(&self) {
        info!("uniqueness statistics:");
        info!("  records observed:    {}", self.records);
        info!("  distinct clients:    {}", self.clients.len());
        info!("  distinct trace ids:  {}", self.trace_ids.len());
        info!("  distinct dedup keys: {}", self.dedup_keys.len());
    }
}
