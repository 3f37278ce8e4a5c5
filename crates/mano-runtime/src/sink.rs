//! Score and render sinks
//!
//! The core only ever emits "+1" score events. The running total lives in the
//! sink, outside every game.

use std::sync::Arc;

use mano_core::{FrameTime, GameKind, RenderCommand};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// One score event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    pub game: GameKind,
    /// Always 1
    pub delta: u8,
    pub timestamp: FrameTime,
}

/// Receiver of score events. Fire-and-forget: a sink cannot fail a tick.
pub trait ScoreSink {
    fn on_score(&mut self, event: ScoreEvent);
}

/// Receiver of per-tick draw lists
pub trait RenderSink {
    fn render(&mut self, timestamp: FrameTime, commands: &[RenderCommand]);
}

/// Request body of the score persistence API (`POST /scores`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub score: u64,
    pub game_type: GameKind,
}

#[derive(Debug, Default)]
struct TallyInner {
    score: u64,
    game: Option<GameKind>,
    last_scored: Option<FrameTime>,
}

/// Shared running score. Clones share the same total.
#[derive(Debug, Clone, Default)]
pub struct ScoreTally {
    inner: Arc<Mutex<TallyInner>>,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.inner.lock().score
    }

    pub fn last_scored(&self) -> Option<FrameTime> {
        self.inner.lock().last_scored
    }

    /// Submission record for the game that scored; `None` before any score
    pub fn submission(&self) -> Option<ScoreSubmission> {
        let inner = self.inner.lock();
        inner.game.map(|game_type| ScoreSubmission {
            score: inner.score,
            game_type,
        })
    }

    /// Start over, e.g. for a new session
    pub fn reset(&self) {
        *self.inner.lock() = TallyInner::default();
    }
}

impl ScoreSink for ScoreTally {
    fn on_score(&mut self, event: ScoreEvent) {
        let mut inner = self.inner.lock();
        inner.score += u64::from(event.delta);
        inner.game = Some(event.game);
        inner.last_scored = Some(event.timestamp);
    }
}

/// Forwards score events over a tokio channel
#[derive(Debug, Clone)]
pub struct ChannelScoreSink {
    tx: mpsc::UnboundedSender<ScoreEvent>,
}

impl ChannelScoreSink {
    pub fn new(tx: mpsc::UnboundedSender<ScoreEvent>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ScoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ScoreSink for ChannelScoreSink {
    fn on_score(&mut self, event: ScoreEvent) {
        if self.tx.send(event).is_err() {
            debug!(timestamp = %event.timestamp, "score receiver gone, dropping event");
        }
    }
}

/// Render sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn render(&mut self, _timestamp: FrameTime, _commands: &[RenderCommand]) {}
}

/// Render sink that keeps the latest draw list
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderSink {
    frames: u64,
    last_timestamp: Option<FrameTime>,
    last: Vec<RenderCommand>,
}

impl RecordingRenderSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of draw lists received
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_timestamp(&self) -> Option<FrameTime> {
        self.last_timestamp
    }

    pub fn last(&self) -> &[RenderCommand] {
        &self.last
    }
}

impl RenderSink for RecordingRenderSink {
    fn render(&mut self, timestamp: FrameTime, commands: &[RenderCommand]) {
        self.frames += 1;
        self.last_timestamp = Some(timestamp);
        self.last = commands.to_vec();
    }
}

impl<T: ScoreSink + ?Sized> ScoreSink for &mut T {
    fn on_score(&mut self, event: ScoreEvent) {
        (**self).on_score(event)
    }
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn render(&mut self, timestamp: FrameTime, commands: &[RenderCommand]) {
        (**self).render(timestamp, commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(game: GameKind, t: u64) -> ScoreEvent {
        ScoreEvent {
            game,
            delta: 1,
            timestamp: FrameTime::from_millis(t),
        }
    }

    #[test]
    fn test_tally_clones_share_total() {
        let tally = ScoreTally::new();
        let mut sink = tally.clone();
        assert_eq!(tally.submission(), None);

        sink.on_score(event(GameKind::PoseMatch, 10));
        sink.on_score(event(GameKind::PoseMatch, 20));

        assert_eq!(tally.score(), 2);
        assert_eq!(tally.last_scored(), Some(FrameTime::from_millis(20)));
        assert_eq!(
            tally.submission(),
            Some(ScoreSubmission {
                score: 2,
                game_type: GameKind::PoseMatch
            })
        );

        tally.reset();
        assert_eq!(sink.score(), 0);
    }

    #[test]
    fn test_submission_json_shape() {
        let submission = ScoreSubmission {
            score: 7,
            game_type: GameKind::ShapeTrace,
        };
        let json = serde_json::to_string(&submission).unwrap();
        assert_eq!(json, r#"{"score":7,"gameType":"ShapeTrace"}"#);

        let back: ScoreSubmission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, submission);
    }

    #[test]
    fn test_channel_sink_forwards_and_tolerates_closed_receiver() {
        let (mut sink, mut rx) = ChannelScoreSink::channel();
        sink.on_score(event(GameKind::ReactionTarget, 5));
        assert_eq!(rx.try_recv().unwrap(), event(GameKind::ReactionTarget, 5));

        drop(rx);
        sink.on_score(event(GameKind::ReactionTarget, 6));
    }

    #[test]
    fn test_recording_sink_keeps_latest() {
        let mut sink = RecordingRenderSink::new();
        let mut list = mano_core::RenderList::new();
        list.cursor(mano_core::Point2::new(1.0, 2.0));

        sink.render(FrameTime::from_millis(1), &[]);
        sink.render(FrameTime::from_millis(2), list.commands());

        assert_eq!(sink.frames(), 2);
        assert_eq!(sink.last_timestamp(), Some(FrameTime::from_millis(2)));
        assert_eq!(sink.last().len(), 1);
    }
}
