//! Cadence - fixed-period schedule (target spawns)

use std::time::Duration;

use mano_core::FrameTime;

/// Fires once per period. The first poll always fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period: Duration,
    last_fired: Option<FrameTime>,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        Cadence {
            period,
            last_fired: None,
        }
    }

    /// Has a full period passed since the last firing
    pub fn is_due(&self, now: FrameTime) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now - last >= self.period,
        }
    }

    /// Fire if due; returns whether it fired
    pub fn poll(&mut self, now: FrameTime) -> bool {
        if self.is_due(now) {
            self.last_fired = Some(now);
            true
        } else {
            false
        }
    }

    pub fn last_fired(&self) -> Option<FrameTime> {
        self.last_fired
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time until the next firing
    pub fn until_next(&self, now: FrameTime) -> Duration {
        match self.last_fired {
            None => Duration::ZERO,
            Some(last) => self.period.saturating_sub(now - last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_fires() {
        let mut cadence = Cadence::new(Duration::from_millis(2_000));
        assert!(cadence.poll(FrameTime::from_millis(0)));
        assert_eq!(cadence.last_fired(), Some(FrameTime::ZERO));
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut cadence = Cadence::new(Duration::from_millis(2_000));
        assert!(cadence.poll(FrameTime::from_millis(100)));
        assert!(!cadence.poll(FrameTime::from_millis(1_000)));
        assert!(!cadence.poll(FrameTime::from_millis(2_099)));
        assert!(cadence.poll(FrameTime::from_millis(2_100)));
        assert!(!cadence.poll(FrameTime::from_millis(2_100)));
    }

    #[test]
    fn test_until_next() {
        let mut cadence = Cadence::new(Duration::from_millis(2_000));
        assert_eq!(cadence.until_next(FrameTime::ZERO), Duration::ZERO);
        cadence.poll(FrameTime::ZERO);
        assert_eq!(
            cadence.until_next(FrameTime::from_millis(500)),
            Duration::from_millis(1_500)
        );
    }
}
