//! Scripted source and detector for end-to-end sessions
//!
//! The source carries the detector's answer inside each frame, so a session
//! replays a timeline exactly. Failures can be injected at chosen ticks.

use std::collections::VecDeque;
use std::time::Duration;

use mano_core::{CanvasSize, FrameTime, ManoError, ManoResult};
use mano_runtime::{Detection, FrameSource, HandDetector, SourceFrame};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::trace;

use crate::timeline::Timeline;

/// What the scripted detector answers for a frame
pub type ScriptedAnswer = ManoResult<Option<Detection>>;

/// Frame source replaying a timeline
#[derive(Debug)]
pub struct ScriptedSource {
    canvas: CanvasSize,
    frames: VecDeque<(FrameTime, ScriptedAnswer)>,
    pacing: Option<Interval>,
    /// Stamp frames with the session clock instead of the script time
    live_clock: bool,
}

impl ScriptedSource {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let frames = timeline
            .detections()
            .into_iter()
            .map(|(t, detection)| (t, Ok(detection)))
            .collect();
        ScriptedSource {
            canvas: timeline.canvas(),
            frames,
            pacing: None,
            live_clock: false,
        }
    }

    /// Release one frame per `period` of real time. Needs a tokio runtime.
    pub fn paced(mut self, period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.pacing = Some(interval);
        self
    }

    /// Leave timestamps to the session clock
    pub fn live_clock(mut self) -> Self {
        self.live_clock = true;
        self
    }

    /// Replace the answer at `index` with an error
    pub fn fail_at(mut self, index: usize, error: ManoError) -> Self {
        if let Some(frame) = self.frames.get_mut(index) {
            frame.1 = Err(error);
        }
        self
    }

    /// Frames not yet handed out
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedSource {
    type Input = ScriptedAnswer;

    async fn next_frame(&mut self) -> Option<SourceFrame<ScriptedAnswer>> {
        if let Some(interval) = self.pacing.as_mut() {
            interval.tick().await;
        }
        let (timestamp, answer) = self.frames.pop_front()?;
        let frame = if self.live_clock {
            SourceFrame::new(answer, self.canvas)
        } else {
            SourceFrame::at(answer, timestamp, self.canvas)
        };
        Some(frame)
    }
}

/// Detector answering with whatever the frame carries
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    latency: Option<Duration>,
    calls: u64,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated inference time per call
    pub fn with_latency(latency: Duration) -> Self {
        ScriptedDetector {
            latency: Some(latency),
            calls: 0,
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl HandDetector for ScriptedDetector {
    type Input = ScriptedAnswer;

    async fn detect(&mut self, input: &ScriptedAnswer, timestamp: FrameTime) -> ScriptedAnswer {
        self.calls += 1;
        if let Some(latency) = self.latency {
            time::sleep(latency).await;
        }
        trace!(%timestamp, call = self.calls, "scripted detection");
        input.clone()
    }
}
