//! Time sources.

use chrono::Utc;

/// Supplies the current unix time in seconds.
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> u64;
}

/// Wall clock. A system clock set before 1970 reads as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// A clock frozen at a fixed unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> u64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn unix_seconds(&self) -> u64 {
        (**self).unix_seconds()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn unix_seconds(&self) -> u64 {
        (**self).unix_seconds()
    }
}

/// Current unix timestamp in seconds.
pub fn current_unix_time() -> u64 {
    SystemClock.unix_seconds()
}
