//! Frame clock - monotonic session clock for stamping frames

use std::time::Instant;

use mano_core::FrameTime;

/// Monotonic session clock.
/// INVARIANT: successive readings never go backwards
pub struct FrameClock {
    /// Session epoch
    reference: Instant,
    /// Last reading handed out
    last: FrameTime,
}

impl FrameClock {
    /// Clock starting at zero now
    pub fn new() -> Self {
        FrameClock {
            reference: Instant::now(),
            last: FrameTime::ZERO,
        }
    }

    /// Read the clock
    pub fn now(&mut self) -> FrameTime {
        let elapsed = self.reference.elapsed();
        let t = FrameTime::from_duration(elapsed).max(self.last);
        self.last = t;
        t
    }

    /// Last reading without advancing
    pub fn last(&self) -> FrameTime {
        self.last
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
