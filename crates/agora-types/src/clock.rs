//! Contest time source
//!
//! All window enforcement compares a global monotonically increasing clock
//! against stored bounds at call time. Engines take the clock as an explicit
//! trait object so the environment (or a test) decides what "now" means.

use std::sync::atomic::{AtomicI64, Ordering};

/// Global time source, in unix seconds
pub trait ContestClock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall-clock time via chrono
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ContestClock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Settable clock for deterministic tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl ContestClock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.advance(50);
        assert_eq!(clock.now(), 150);
        clock.set(10);
        assert_eq!(clock.now(), 10);
    }

    #[test]
    fn test_system_clock_is_positive() {
        assert!(SystemClock.now() > 0);
    }
}
