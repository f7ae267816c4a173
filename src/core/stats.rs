//! Per-level emission counters
//!
//! [`LevelCounters`] is the live, shared set of counters a logger bumps on
//! every emitted record. [`LevelStats`] is a plain copy taken from it.

use super::log_level::{LogLevel, LEVEL_COUNT};
use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct LevelCounters {
    counts: [AtomicU64; LEVEL_COUNT],
}

impl LevelCounters {
    /// Create a counter set with all levels at zero
    pub const fn new() -> Self {
        Self {
            counts: [
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
            ],
        }
    }

    /// Record one emitted record; returns the previous count
    #[inline]
    pub fn record(&self, level: LogLevel) -> u64 {
        self.counts[level.index()].fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn get(&self, level: LogLevel) -> u64 {
        self.counts[level.index()].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> LevelStats {
        let mut counts = [0u64; LEVEL_COUNT];
        for (slot, counter) in counts.iter_mut().zip(self.counts.iter()) {
            *slot = counter.load(Ordering::Relaxed);
        }
        LevelStats { counts }
    }

}

impl Default for LevelCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the six per-level counters.
///
/// # Example
///
/// ```
/// use rust_daily_logger::core::LevelCounters;
/// use rust_daily_logger::LogLevel;
///
/// let counters = LevelCounters::new();
/// counters.record(LogLevel::Warn);
///
/// let stats = counters.snapshot();
/// counters.record(LogLevel::Warn);
///
/// assert_eq!(stats[LogLevel::Warn], 1);
/// assert_eq!(stats.total(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelStats {
    counts: [u64; LEVEL_COUNT],
}

impl LevelStats {
    #[inline]
    pub fn get(&self, level: LogLevel) -> u64 {
        self.counts[level.index()]
    }

    /// Sum over all levels
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts indexed by level, DEBUG first
    pub fn as_array(&self) -> [u64; LEVEL_COUNT] {
        self.counts
    }
}

impl Index<LogLevel> for LevelStats {
    type Output = u64;

    fn index(&self, level: LogLevel) -> &u64 {
        &self.counts[level.index()]
    }
}
