//! DirectionalSwipe - swipe the fingertip in the prompted direction
//!
//! The first fingertip position seen in a round anchors the swipe. Once the
//! fingertip has moved further than the threshold from the anchor, the
//! dominant axis of the displacement decides the direction. Either way the
//! round ends and a new prompt is drawn; only a match scores.

use std::time::Duration;

use mano_core::{
    distance, Color, Frame, FrameTime, GameEvent, GameKind, Paint, Point2, RenderList,
    SwipeDirection,
};
use mano_time::RoundTimer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::machine::{hud_line, HUD_SIZE};
use crate::{GameMachine, TickOutput};

/// DirectionalSwipe configuration
#[derive(Debug, Clone)]
pub struct SwipeConfig {
    pub round_time: Duration,
    /// Displacement in pixels that completes a swipe
    pub distance_threshold: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        SwipeConfig {
            round_time: Duration::from_secs(5),
            distance_threshold: 80.0,
        }
    }
}

impl SwipeConfig {
    pub fn relaxed() -> Self {
        SwipeConfig {
            round_time: Duration::from_secs(8),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SwipeRound {
    timer: RoundTimer,
    prompt: SwipeDirection,
    start: Option<Point2>,
}

/// DirectionalSwipe game
#[derive(Debug)]
pub struct DirectionalSwipe {
    config: SwipeConfig,
    rng: StdRng,
    round: Option<SwipeRound>,
    /// Last detected swipe and whether it matched
    last_swipe: Option<(SwipeDirection, bool)>,
}

impl DirectionalSwipe {
    pub fn new(config: SwipeConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SwipeConfig, rng: StdRng) -> Self {
        DirectionalSwipe {
            config,
            rng,
            round: None,
            last_swipe: None,
        }
    }

    /// Direction the player is asked to swipe
    pub fn prompt(&self) -> Option<SwipeDirection> {
        self.round.map(|r| r.prompt)
    }

    /// Anchor of the swipe in progress
    pub fn swipe_start(&self) -> Option<Point2> {
        self.round.and_then(|r| r.start)
    }

    pub fn last_swipe(&self) -> Option<(SwipeDirection, bool)> {
        self.last_swipe
    }

    fn new_round(&mut self, now: FrameTime) -> SwipeRound {
        let prompt = *SwipeDirection::ALL
            .choose(&mut self.rng)
            .unwrap_or(&SwipeDirection::Left);
        debug!(%now, %prompt, "swipe round started");
        SwipeRound {
            timer: RoundTimer::start(now, self.config.round_time),
            prompt,
            start: None,
        }
    }

    /// Track the fingertip; returns the detected direction once the
    /// threshold is crossed
    fn track(&mut self, tip: Point2) -> Option<(SwipeDirection, SwipeDirection)> {
        let round = self.round.as_mut()?;
        let Some(start) = round.start else {
            round.start = Some(tip);
            return None;
        };
        if distance(start, tip) <= self.config.distance_threshold {
            return None;
        }
        let direction = SwipeDirection::from_delta(tip.x - start.x, tip.y - start.y);
        Some((direction, round.prompt))
    }

    fn render(&self, frame: &Frame, render: &mut RenderList) {
        let now = frame.timestamp;
        if let Some(round) = &self.round {
            render.text(
                hud_line(0),
                format!("Swipe {}!", round.prompt.as_str().to_uppercase()),
                HUD_SIZE,
            );
            render.text(
                hud_line(1),
                format!("Time: {}s", round.timer.remaining_secs_ceil(now)),
                HUD_SIZE,
            );
            if let Some(start) = round.start {
                render.circle(start, 6.0, Paint::fill(Color::Checkpoint));
                if let Some(tip) = frame.fingertip() {
                    render.polyline(vec![start, tip], Paint::stroke(Color::Trail, 3.0));
                }
            }
        }
        if let Some((direction, matched)) = self.last_swipe {
            let verdict = if matched { "nice" } else { "wrong way" };
            render.text(hud_line(2), format!("Last: {} ({})", direction, verdict), HUD_SIZE);
        }
        if let Some(tip) = frame.fingertip() {
            render.cursor(tip);
        }
    }
}

impl GameMachine for DirectionalSwipe {
    fn kind(&self) -> GameKind {
        GameKind::DirectionalSwipe
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        let now = frame.timestamp;
        let mut events = Vec::new();
        let mut scored = false;

        match self.round.map(|r| r.timer.expired(now)) {
            None => self.round = Some(self.new_round(now)),
            Some(true) => {
                debug!(%now, "swipe round expired");
                events.push(GameEvent::RoundExpired);
                self.round = Some(self.new_round(now));
            }
            Some(false) => {
                let swipe = frame.fingertip().and_then(|tip| self.track(tip));
                if let Some((direction, prompt)) = swipe {
                    let matched = direction == prompt;
                    scored = matched;
                    self.last_swipe = Some((direction, matched));
                    debug!(%now, %direction, %prompt, matched, "swipe detected");
                    events.push(GameEvent::SwipeDetected { direction, matched });
                    self.round = Some(self.new_round(now));
                }
            }
        }

        let mut render = RenderList::new();
        self.render(frame, &mut render);
        TickOutput::new(scored, render, events)
    }
}
