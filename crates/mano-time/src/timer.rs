//! Round timer - tracks one round against a fixed duration
//!
//! INVARIANT: the timer never pauses; a restart is the only way back to zero

use std::time::Duration;

use mano_core::FrameTime;

/// Round timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimer {
    /// When the current round started
    round_start: FrameTime,
    /// Configured round duration
    duration: Duration,
}

impl RoundTimer {
    /// Start a round at `now`
    pub fn start(now: FrameTime, duration: Duration) -> Self {
        RoundTimer {
            round_start: now,
            duration,
        }
    }

    /// Begin a new round at `now`
    pub fn restart(&mut self, now: FrameTime) {
        self.round_start = now;
    }

    pub fn round_start(&self) -> FrameTime {
        self.round_start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time since the round started
    pub fn elapsed(&self, now: FrameTime) -> Duration {
        now - self.round_start
    }

    /// `max(0, duration - elapsed)`
    pub fn remaining(&self, now: FrameTime) -> Duration {
        self.duration.saturating_sub(self.elapsed(now))
    }

    /// Strictly past the duration
    pub fn expired(&self, now: FrameTime) -> bool {
        self.elapsed(now) > self.duration
    }

    /// Remaining time as whole seconds, rounded up, for display
    pub fn remaining_secs_ceil(&self, now: FrameTime) -> u64 {
        let ms = self.remaining(now).as_millis() as u64;
        (ms + 999) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_timer_expiry_is_strict() {
        let timer = RoundTimer::start(FrameTime::from_millis(1_000), Duration::from_millis(5_000));

        assert!(!timer.expired(FrameTime::from_millis(6_000)));
        assert!(timer.expired(FrameTime::from_millis(6_001)));
    }

    #[test]
    fn test_remaining_saturates() {
        let timer = RoundTimer::start(FrameTime::ZERO, Duration::from_millis(5_000));

        assert_eq!(
            timer.remaining(FrameTime::from_millis(1_500)),
            Duration::from_millis(3_500)
        );
        assert_eq!(timer.remaining(FrameTime::from_millis(9_000)), Duration::ZERO);
    }

    #[test]
    fn test_restart() {
        let mut timer = RoundTimer::start(FrameTime::ZERO, Duration::from_millis(100));
        timer.restart(FrameTime::from_millis(500));

        assert_eq!(timer.elapsed(FrameTime::from_millis(550)), Duration::from_millis(50));
        assert!(!timer.expired(FrameTime::from_millis(600)));
    }

    #[test]
    fn test_time_before_start_counts_as_zero() {
        let timer = RoundTimer::start(FrameTime::from_millis(1_000), Duration::from_millis(100));
        assert_eq!(timer.elapsed(FrameTime::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn test_remaining_secs_ceil() {
        let timer = RoundTimer::start(FrameTime::ZERO, Duration::from_secs(5));
        assert_eq!(timer.remaining_secs_ceil(FrameTime::from_millis(1)), 5);
        assert_eq!(timer.remaining_secs_ceil(FrameTime::from_millis(4_000)), 1);
        assert_eq!(timer.remaining_secs_ceil(FrameTime::from_millis(5_000)), 0);
    }

    proptest! {
        #[test]
        fn prop_elapsed_plus_remaining(start in 0u64..1_000_000, offset in 0u64..20_000, dur in 1u64..10_000) {
            let timer = RoundTimer::start(FrameTime::from_millis(start), Duration::from_millis(dur));
            let now = FrameTime::from_millis(start + offset);
            if !timer.expired(now) {
                prop_assert_eq!(timer.elapsed(now) + timer.remaining(now), Duration::from_millis(dur));
            } else {
                prop_assert_eq!(timer.remaining(now), Duration::ZERO);
            }
        }
    }
}
