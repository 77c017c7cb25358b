//! Time abstractions
//!
//! Arming a timer is always "fire this far from now", so the registry needs
//! a duration type that cannot be confused with a point in time, and a point
//! type that cannot be confused with wall-clock time. In the simulated host
//! time is virtual; in a real host it maps to the chosen clock source.

use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

/// A point on the host's timeline
///
/// Opaque nanoseconds since an arbitrary epoch. Instants from different
/// hosts (or different clock sources) are not comparable in any meaningful
/// way; the registry only ever compares instants it got from the same host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Instant {
    nanos: u64,
}

impl Instant {
    /// Creates an instant from nanoseconds since the host's epoch
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Returns nanoseconds since the host's epoch
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Returns the duration elapsed since an earlier instant
    ///
    /// Saturates to zero if `earlier` is actually later; monotonic clocks
    /// make that impossible, but the type does not assume it.
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, delay: Duration) -> Self::Output {
        Instant::from_nanos(self.nanos.saturating_add(delay.as_nanos()))
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, delay: Duration) -> Self::Output {
        Instant::from_nanos(self.nanos.saturating_sub(delay.as_nanos()))
    }
}

/// A span of time, such as a tick period
///
/// Explicit and type-safe: a duration is never implicitly an absolute time,
/// and arming APIs take `Duration` so callers cannot pass a deadline where a
/// delay is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    /// Creates a duration from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a duration from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Creates a duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * 1_000_000_000,
        }
    }

    /// Returns the duration in nanoseconds
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Returns the duration in whole milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Returns the duration in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.nanos / 1_000_000_000
    }

    /// Returns true for the zero-length duration
    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Self::Output {
        Duration::from_nanos(self.nanos.saturating_add(other.nanos))
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Self::Output {
        Duration::from_nanos(self.nanos.saturating_sub(other.nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_units_agree() {
        let d1 = Duration::from_secs(1);
        let d2 = Duration::from_millis(1000);
        let d3 = Duration::from_nanos(1_000_000_000);

        assert_eq!(d1, d2);
        assert_eq!(d2, d3);
        assert_eq!(d1.as_millis(), 1000);
        assert_eq!(d1.as_secs(), 1);
    }

    #[test]
    fn test_duration_arithmetic() {
        let d1 = Duration::from_millis(1500);
        let d2 = Duration::from_millis(500);

        assert_eq!(d1 + d2, Duration::from_secs(2));
        assert_eq!(d1 - d2, Duration::from_secs(1));
        // Subtraction saturates rather than wrapping.
        assert_eq!(d2 - d1, Duration::from_nanos(0));
    }

    #[test]
    fn test_duration_is_zero() {
        assert!(Duration::from_nanos(0).is_zero());
        assert!(!Duration::from_millis(1).is_zero());
    }

    #[test]
    fn test_instant_ordering() {
        let earlier = Instant::from_nanos(1_000);
        let later = Instant::from_nanos(2_000);
        assert!(later > earlier);
    }

    #[test]
    fn test_deadline_computation() {
        let now = Instant::from_nanos(5_000);
        let period = Duration::from_nanos(1_000);

        let deadline = now + period;
        assert_eq!(deadline, Instant::from_nanos(6_000));
        assert_eq!(deadline.duration_since(now), period);
    }

    #[test]
    fn test_duration_since_saturates() {
        let earlier = Instant::from_nanos(1_000);
        let later = Instant::from_nanos(2_000);
        assert_eq!(earlier.duration_since(later), Duration::from_nanos(0));
    }
}
