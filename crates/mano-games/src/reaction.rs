//! ReactionTarget - touch targets that spawn on a fixed cadence
//!
//! A target appears every spawn interval at a random on-canvas position. An
//! untouched target is simply replaced at the next spawn; misses carry no
//! penalty. Touching the active target scores and records the reaction time.

use std::time::Duration;

use mano_core::{
    point_in_circle, CanvasSize, Color, Frame, FrameTime, GameEvent, GameKind, Paint, Point2,
    RenderList,
};
use mano_time::Cadence;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::machine::{hud_line, HUD_SIZE};
use crate::{GameMachine, TickOutput};

/// ReactionTarget configuration
#[derive(Debug, Clone)]
pub struct ReactionConfig {
    /// Time between spawns
    pub spawn_interval: Duration,
    /// Target radius in pixels
    pub target_radius: f32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        ReactionConfig {
            spawn_interval: Duration::from_millis(2_000),
            target_radius: 40.0,
        }
    }
}

impl ReactionConfig {
    /// Slower cadence, bigger targets
    pub fn relaxed() -> Self {
        ReactionConfig {
            spawn_interval: Duration::from_millis(3_000),
            target_radius: 55.0,
        }
    }
}

/// An active target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub center: Point2,
    pub radius: f32,
    pub spawned_at: FrameTime,
}

/// Target lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReactionState {
    NoTarget,
    TargetActive(Target),
}

/// ReactionTarget game
#[derive(Debug)]
pub struct ReactionTarget {
    config: ReactionConfig,
    rng: StdRng,
    cadence: Cadence,
    state: ReactionState,
    /// Reaction time of the last hit, for display
    last_reaction: Option<Duration>,
    spawned: u64,
}

impl ReactionTarget {
    pub fn new(config: ReactionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: ReactionConfig, rng: StdRng) -> Self {
        ReactionTarget {
            cadence: Cadence::new(config.spawn_interval),
            config,
            rng,
            state: ReactionState::NoTarget,
            last_reaction: None,
            spawned: 0,
        }
    }

    pub fn state(&self) -> ReactionState {
        self.state
    }

    pub fn target(&self) -> Option<Target> {
        match self.state {
            ReactionState::TargetActive(target) => Some(target),
            ReactionState::NoTarget => None,
        }
    }

    pub fn last_reaction(&self) -> Option<Duration> {
        self.last_reaction
    }

    /// Number of targets spawned so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Random center keeping the whole target on the canvas
    fn random_center(&mut self, canvas: CanvasSize) -> Point2 {
        let r = self.config.target_radius;
        let x = if canvas.width > 2.0 * r {
            self.rng.gen_range(r..=canvas.width - r)
        } else {
            canvas.width / 2.0
        };
        let y = if canvas.height > 2.0 * r {
            self.rng.gen_range(r..=canvas.height - r)
        } else {
            canvas.height / 2.0
        };
        Point2::new(x, y)
    }

    fn spawn(&mut self, now: FrameTime, canvas: CanvasSize, events: &mut Vec<GameEvent>) {
        if matches!(self.state, ReactionState::TargetActive(_)) {
            events.push(GameEvent::TargetMissed);
        }

        let center = self.random_center(canvas);
        self.state = ReactionState::TargetActive(Target {
            center,
            radius: self.config.target_radius,
            spawned_at: now,
        });
        self.spawned += 1;
        debug!(%now, x = center.x, y = center.y, "target spawned");
        events.push(GameEvent::TargetSpawned {
            index: self.spawned,
        });
    }

    fn render(&self, frame: &Frame, render: &mut RenderList) {
        if let Some(target) = self.target() {
            render.circle(target.center, target.radius, Paint::fill(Color::Target));
        }
        if let Some(tip) = frame.fingertip() {
            render.cursor(tip);
        }
        let text = match self.last_reaction {
            Some(reaction) => format!("Reaction: {} ms", reaction.as_millis()),
            None => "Touch the targets!".to_string(),
        };
        render.text(hud_line(0), text, HUD_SIZE);
    }
}

impl GameMachine for ReactionTarget {
    fn kind(&self) -> GameKind {
        GameKind::ReactionTarget
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        let now = frame.timestamp;
        let mut events = Vec::new();
        let mut scored = false;

        if self.cadence.poll(now) {
            self.spawn(now, frame.canvas, &mut events);
        }

        if let (ReactionState::TargetActive(target), Some(tip)) = (self.state, frame.fingertip()) {
            if point_in_circle(tip, target.center, target.radius) {
                let reaction = now - target.spawned_at;
                self.last_reaction = Some(reaction);
                self.state = ReactionState::NoTarget;
                scored = true;
                debug!(%now, reaction_ms = reaction.as_millis() as u64, "target hit");
                events.push(GameEvent::TargetHit { reaction });
            }
        }

        let mut render = RenderList::new();
        self.render(frame, &mut render);
        TickOutput::new(scored, render, events)
    }
}
