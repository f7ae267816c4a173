//! Optional mutual exclusion for the write path
//!
//! A logger either serialises every record with a real lock or runs
//! unserialised for throughput. The choice is made once, at construction.

use parking_lot::{Mutex, MutexGuard};

/// Lock strategy for a logger's write path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockStrategy {
    /// No serialisation. Concurrent records may interleave at the sink.
    #[default]
    Disabled,
    /// Records are written one at a time, start to finish.
    Mutex,
}

impl From<bool> for LockStrategy {
    fn from(enabled: bool) -> Self {
        if enabled {
            LockStrategy::Mutex
        } else {
            LockStrategy::Disabled
        }
    }
}

/// A mutex that only locks when enabled.
#[derive(Debug, Default)]
pub struct MutexWrap {
    lock: Mutex<()>,
    enabled: bool,
}

/// Held while a record is being written; empty when the lock is disabled.
pub type WriteGuard<'a> = Option<MutexGuard<'a, ()>>;

impl MutexWrap {
    pub fn new(strategy: LockStrategy) -> Self {
        Self {
            lock: Mutex::new(()),
            enabled: strategy == LockStrategy::Mutex,
        }
    }

    #[inline]
    pub fn lock(&self) -> WriteGuard<'_> {
        if self.enabled {
            Some(self.lock.lock())
        } else {
            None
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn strategy(&self) -> LockStrategy {
        LockStrategy::from(self.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_lock_is_a_no_op() {
        let mu = MutexWrap::new(LockStrategy::Disabled);
        let first = mu.lock();
        let second = mu.lock();
        assert!(first.is_none() && second.is_none());
        assert!(!mu.is_enabled());
    }

    #[test]
    fn test_enabled_lock_excludes() {
        let mu = MutexWrap::new(LockStrategy::Mutex);
        let guard = mu.lock();
        assert!(guard.is_some());
        assert!(mu.lock.try_lock().is_none());
        drop(guard);
        assert!(mu.lock.try_lock().is_some());
    }

    #[test]
    fn test_strategy_from_flag() {
        assert_eq!(LockStrategy::from(true), LockStrategy::Mutex);
        assert_eq!(LockStrategy::from(false), LockStrategy::Disabled);
        assert_eq!(MutexWrap::new(LockStrategy::Mutex).strategy(), LockStrategy::Mutex);
    }
}
