//! Monotonic time sources for elapsed-time measurement.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Supplies monotonic timestamps in microseconds.
///
/// Injected into executors so tests can measure with a deterministic
/// [`ManualClock`] instead of wall time.
pub trait Clock: Send + Sync {
    /// Microseconds since an arbitrary, fixed origin. Never decreases.
    fn now_micros(&self) -> u64;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// Hand-driven [`Clock`] for deterministic tests.
///
/// Time moves only through [`advance`](ManualClock::advance), plus an
/// optional fixed step added after every reading.
///
/// # Examples
///
/// ```
/// use u_algoselect::execution::{Clock, ManualClock};
///
/// let clock = ManualClock::with_step(250);
/// let start = clock.now_micros();
/// let end = clock.now_micros();
/// assert_eq!(end - start, 250);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
    step: u64,
}

impl ManualClock {
    /// A clock frozen at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that advances by `step` microseconds after each reading.
    pub fn with_step(step: u64) -> Self {
        Self {
            now: AtomicU64::new(0),
            step,
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, micros: u64) {
        self.now.fetch_add(micros, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_decreases() {
        let clock = MonotonicClock::new();
        let mut last = clock.now_micros();
        for _ in 0..1000 {
            let now = clock.now_micros();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_manual_frozen() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_micros(), 0);
        assert_eq!(clock.now_micros(), 0);
        clock.advance(40);
        assert_eq!(clock.now_micros(), 40);
    }

    #[test]
    fn test_manual_step() {
        let clock = ManualClock::with_step(10);
        assert_eq!(clock.now_micros(), 0);
        assert_eq!(clock.now_micros(), 10);
        clock.advance(5);
        assert_eq!(clock.now_micros(), 25);
    }
}
