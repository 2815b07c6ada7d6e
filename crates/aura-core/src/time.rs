//! Capture-relative time
//!
//! All throttling, staleness, and adapter timestamps run on a single
//! monotonic clock anchored at session start. Core logic only ever sees
//! `CaptureTime`; conversion from `std::time::Instant` happens once, at the
//! runtime boundary, which keeps every time-dependent component testable
//! with injected timestamps.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Monotonic time since capture session start, in microseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CaptureTime(pub u64);

impl CaptureTime {
    pub const ZERO: CaptureTime = CaptureTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        CaptureTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        CaptureTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        CaptureTime((secs * 1_000_000.0) as u64)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        CaptureTime(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Elapsed duration since an earlier time (zero if `earlier` is ahead).
    #[inline]
    pub fn since(self, earlier: CaptureTime) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for CaptureTime {
    type Output = CaptureTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        CaptureTime(self.0 + rhs.as_micros() as u64)
    }
}

impl Sub<CaptureTime> for CaptureTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: CaptureTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for CaptureTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{:.3}ms", self.as_micros() as f64 / 1000.0)
    }
}
