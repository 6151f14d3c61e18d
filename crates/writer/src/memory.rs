//! Memory-pressure sampling between directory groups.

use crate::error::WriterError;
use sysinfo::System;
use tracing::warn;

/// Samples system memory utilization and aborts the run past a critical
/// threshold. Checked once before each directory group, not per file.
#[derive(Debug, Clone)]
pub struct MemoryGuard {
    /// Warn-and-resample threshold, percent of total memory in use.
    pub high_water_percent: f32,
    /// Abort threshold (unless `force`).
    pub critical_percent: f32,
    /// User override: log and continue instead of aborting.
    pub force: bool,
    enabled: bool,
}

impl Default for MemoryGuard {
    fn default() -> Self {
        Self {
            high_water_percent: 85.0,
            critical_percent: 90.0,
            force: false,
            enabled: true,
        }
    }
}

impl MemoryGuard {
    pub fn new(force: bool) -> Self {
        Self {
            force,
            ..Self::default()
        }
    }

    /// Guard that never samples; used by tests and flat small runs.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sample utilization; past the high-water mark, re-sample once and
    /// abort if still above the critical mark.
    pub fn check(&self) -> Result<(), WriterError> {
        if !self.enabled {
            return Ok(());
        }

        let mut sys = System::new();
        sys.refresh_memory();
        let first = used_percent(&sys);
        if first <= self.high_water_percent {
            return Ok(());
        }

        warn!("memory utilization at {first:.1}%, re-sampling");
        sys.refresh_memory();
        let second = used_percent(&sys);
        if second > self.critical_percent {
            if self.force {
                warn!("memory utilization {second:.1}% above the critical mark, continuing (--force)");
            } else {
                return Err(WriterError::ResourceExhausted {
                    used_percent: second,
                });
            }
        }
        Ok(())
    }
}

fn used_percent(sys: &System) -> f32 {
    let total = sys.total_memory();
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(sys.available_memory());
    used as f32 / total as f32 * 100.0
}
