//! Frame time for Anchor
//!
//! Every frame reported by the tracking subsystem carries a monotonic
//! timestamp. Anchor never schedules anything on it; it exists for ordering,
//! logging and frame-duration statistics.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Frame time - microseconds since the tracking session started
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub i64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_micros(micros: i64) -> Self {
        FrameTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        FrameTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        FrameTime((secs * 1_000_000.0) as i64)
    }

    #[inline]
    pub fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0.saturating_add(rhs.as_micros() as i64))
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    /// Elapsed time between two frames, zero if `rhs` is later
    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        let diff = self.0 - rhs.0;
        if diff >= 0 {
            Duration::from_micros(diff as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame({:.3}ms)", self.0 as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_units() {
        let t = FrameTime::from_millis(1500);
        assert_eq!(t.as_micros(), 1_500_000);
        assert_eq!(t.as_millis(), 1500);
        assert!((t.as_secs_f64() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_frame_time_difference_saturates() {
        let earlier = FrameTime::from_millis(100);
        let later = earlier + Duration::from_millis(16);

        assert_eq!(later - earlier, Duration::from_millis(16));
        assert_eq!(earlier - later, Duration::ZERO);
    }
}
