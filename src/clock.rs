use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Abstraction over `Instant::now()` so the rebind windows and the delay
/// handler can be exercised deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock whose time only moves when told to. Tests advance it past a
/// rebind deadline without sleeping for real.
pub struct TestClock {
    base: Instant,
    advanced_millis: AtomicU64,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            advanced_millis: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.advanced_millis
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.advanced_millis.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_monotonically() {
        let clock = TestClock::new();
        let first = clock.now();
        clock.advance(Duration::from_secs(5));
        let second = clock.now();
        assert!(second >= first + Duration::from_secs(5));
    }
}
