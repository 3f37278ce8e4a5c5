//! Session statistics

use std::time::Duration;

use mano_core::GameKind;

/// Counters for one session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStats {
    pub ticks: u64,
    /// Ticks whose frame carried a tracked hand
    pub ticks_with_hand: u64,
    /// Detections that reported hands, none of them usable
    pub hands_dropped: u64,
    /// Transient detector errors, each turned into a hand-less tick
    pub detector_failures: u64,
    pub score_events: u64,
    pub game_events: u64,
    pub last_tick_duration: Duration,
    pub max_tick_duration: Duration,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_tick(&mut self, has_hand: bool, scored: bool, events: usize, took: Duration) {
        self.ticks += 1;
        if has_hand {
            self.ticks_with_hand += 1;
        }
        if scored {
            self.score_events += 1;
        }
        self.game_events += events as u64;
        self.last_tick_duration = took;
        self.max_tick_duration = self.max_tick_duration.max(took);
    }

    /// Fraction of ticks with a tracked hand
    pub fn hand_ratio(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.ticks_with_hand as f64 / self.ticks as f64
    }
}

/// Why a session stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The frame source ran out of frames
    SourceExhausted,
    /// Stopped through a [`SessionHandle`](crate::SessionHandle)
    Cancelled,
}

/// Outcome of [`GameSession::run`](crate::GameSession::run)
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    pub game: GameKind,
    pub end: SessionEnd,
    pub stats: SessionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tick() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.hand_ratio(), 0.0);

        stats.record_tick(true, true, 2, Duration::from_micros(300));
        stats.record_tick(false, false, 0, Duration::from_micros(100));

        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.ticks_with_hand, 1);
        assert_eq!(stats.score_events, 1);
        assert_eq!(stats.game_events, 2);
        assert_eq!(stats.last_tick_duration, Duration::from_micros(100));
        assert_eq!(stats.max_tick_duration, Duration::from_micros(300));
        assert!((stats.hand_ratio() - 0.5).abs() < 1e-12);
    }
}
