//! Time source for generated ids and timestamps.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Supplies the current time and a strictly increasing millisecond stamp.
///
/// Ids such as `v{stamp}` and `notif-{stamp}` are built from the stamp, so
/// two calls never return the same value even within one millisecond.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn stamp(&self) -> i64;
}

/// Stamp generator shared by clock implementations.
#[derive(Debug, Default)]
struct MonotonicStamp {
    last: AtomicI64,
}

impl MonotonicStamp {
    fn next(&self, now_millis: i64) -> i64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock {
    stamps: MonotonicStamp,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn Clock> {
        Arc::new(Self::new())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn stamp(&self) -> i64 {
        self.stamps.next(Utc::now().timestamp_millis())
    }
}

/// A clock frozen at one instant; stamps still increase by one per call.
#[derive(Debug)]
pub struct FixedClock {
    at: DateTime<Utc>,
    stamps: MonotonicStamp,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            at,
            stamps: MonotonicStamp::default(),
        }
    }

    /// Convenience constructor from a Unix timestamp in milliseconds.
    pub fn at_millis(millis: i64) -> Self {
        Self::new(Utc.timestamp_millis_opt(millis).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }

    fn stamp(&self) -> i64 {
        self.stamps.next(self.at.timestamp_millis())
    }
}
