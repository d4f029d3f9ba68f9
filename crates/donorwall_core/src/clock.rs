//! Intake timestamp source.
//!
//! # Invariants
//! - `MonotonicClock::now_epoch_ms` never returns a value lower than one it
//!   returned before, even if the wall clock steps backwards.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clamps another clock so successive readings are non-decreasing.
#[derive(Debug)]
pub struct MonotonicClock<C: Clock = SystemClock> {
    inner: C,
    last: AtomicI64,
}

impl<C: Clock> MonotonicClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            last: AtomicI64::new(i64::MIN),
        }
    }
}

impl<C: Clock + Default> Default for MonotonicClock<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Clock> Clock for MonotonicClock<C> {
    fn now_epoch_ms(&self) -> i64 {
        let reading = self.inner.now_epoch_ms();
        let previous = self.last.fetch_max(reading, Ordering::AcqRel);
        reading.max(previous)
    }
}
