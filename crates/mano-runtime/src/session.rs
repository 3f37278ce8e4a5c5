//! Game session - drives one game from a frame source and a detector
//!
//! INVARIANT: at most one detection is in flight. A tick never starts before
//! the previous detection resolved, and a cancelled session never advances
//! its game again.

use std::sync::Arc;
use std::time::Instant;

use mano_core::{CanvasSize, Frame, FrameTime, ManoError, ManoResult};
use mano_games::{Game, GameMachine};
use mano_time::FrameClock;
use tokio::sync::watch;
use tracing::{error, info, trace, warn};

use crate::{
    Detection, FrameSource, HandDetector, RenderSink, ScoreEvent, ScoreSink, SessionEnd,
    SessionReport, SessionStats,
};

/// Stops a running session from anywhere
#[derive(Clone, Debug)]
pub struct SessionHandle {
    stop: Arc<watch::Sender<bool>>,
}

impl SessionHandle {
    /// Request a stop. The session finishes its current synchronous step,
    /// drops any in-flight detection and returns.
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }
}

/// Resolves once a stop is requested. A closed channel never resolves.
async fn stopped(rx: &mut watch::Receiver<bool>) {
    let closed = rx.wait_for(|stop| *stop).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

/// One game, one source, one detector
pub struct GameSession<S, D, K, R> {
    game: Game,
    source: S,
    detector: D,
    scores: K,
    render: R,
    clock: FrameClock,
    stats: SessionStats,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl<S, D, K, R> GameSession<S, D, K, R>
where
    S: FrameSource,
    D: HandDetector<Input = S::Input>,
    K: ScoreSink,
    R: RenderSink,
{
    pub fn new(game: Game, source: S, detector: D, scores: K, render: R) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        GameSession {
            game,
            source,
            detector,
            scores,
            render,
            clock: FrameClock::new(),
            stats: SessionStats::new(),
            stop_tx: Arc::new(stop_tx),
            stop_rx,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            stop: Arc::clone(&self.stop_tx),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn scores(&self) -> &K {
        &self.scores
    }

    pub fn render_sink(&self) -> &R {
        &self.render
    }

    pub fn is_cancelled(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// Run until the source is exhausted or the session is stopped.
    ///
    /// Fatal detector errors end the run with that error. Running a session
    /// that was already stopped yields [`ManoError::SessionCancelled`].
    pub async fn run(&mut self) -> ManoResult<SessionReport> {
        if self.is_cancelled() {
            return Err(ManoError::SessionCancelled);
        }

        let kind = self.game.kind();
        info!(game = %kind, "session started");

        let end = 'ticks: loop {
            let next = tokio::select! {
                biased;
                _ = stopped(&mut self.stop_rx) => break 'ticks SessionEnd::Cancelled,
                next = self.source.next_frame() => next,
            };
            let Some(source_frame) = next else {
                break 'ticks SessionEnd::SourceExhausted;
            };

            let timestamp = match source_frame.timestamp {
                Some(timestamp) => timestamp,
                None => self.clock.now(),
            };

            let detection = tokio::select! {
                biased;
                _ = stopped(&mut self.stop_rx) => break 'ticks SessionEnd::Cancelled,
                result = self.detector.detect(&source_frame.input, timestamp) => result,
            };

            self.tick(timestamp, source_frame.canvas, detection)?;
        };

        info!(
            game = %kind,
            ?end,
            ticks = self.stats.ticks,
            score_events = self.stats.score_events,
            "session stopped"
        );
        Ok(SessionReport {
            game: kind,
            end,
            stats: self.stats.clone(),
        })
    }

    fn tick(
        &mut self,
        timestamp: FrameTime,
        canvas: CanvasSize,
        detection: ManoResult<Option<Detection>>,
    ) -> ManoResult<()> {
        let started = Instant::now();

        let hands = match detection {
            Ok(Some(detection)) => detection.hands,
            Ok(None) => Vec::new(),
            Err(e) if e.is_fatal() => {
                error!(%timestamp, error = %e, "detector unavailable");
                return Err(e);
            }
            Err(e) => {
                warn!(%timestamp, error = %e, "detection failed, tick runs without a hand");
                self.stats.detector_failures += 1;
                Vec::new()
            }
        };

        let reported = !hands.is_empty();
        let frame = Frame::from_detection(timestamp, canvas, hands);
        if reported && !frame.has_hand() {
            self.stats.hands_dropped += 1;
        }

        let out = self.game.advance(&frame);
        for event in &out.events {
            trace!(%timestamp, ?event, "game event");
        }
        if out.scored() {
            self.scores.on_score(ScoreEvent {
                game: self.game.kind(),
                delta: out.score_delta,
                timestamp,
            });
        }
        self.render.render(timestamp, &out.commands);

        self.stats.record_tick(
            frame.has_hand(),
            out.scored(),
            out.events.len(),
            started.elapsed(),
        );
        Ok(())
    }
}
