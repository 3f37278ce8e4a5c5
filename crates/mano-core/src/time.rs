//! Time primitives for MANO
//!
//! Every game decision is driven by the frame timestamp, never by frame
//! counts, so behavior is independent of the rendering rate.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Frame time - milliseconds since the session epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FrameTime(millis)
    }

    #[inline]
    pub fn from_duration(duration: Duration) -> Self {
        FrameTime(duration.as_millis().min(u64::MAX as u128) as u64)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FrameTime(self.0.saturating_add(duration.as_millis().min(u64::MAX as u128) as u64))
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        Duration::from_millis(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({}ms)", self.0)
    }
}

impl std::fmt::Display for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
