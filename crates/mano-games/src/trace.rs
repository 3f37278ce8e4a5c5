//! ShapeTrace - trace a circle or square through its checkpoints
//!
//! A shape is laid out around the canvas center with evenly spaced
//! checkpoints. Tracing starts the first time the fingertip touches the
//! outline; from then on every fingertip sample joins the trail and marks any
//! checkpoint within tolerance as hit. Hitting enough checkpoints completes
//! the shape and a new one is laid out on the next tick.

use std::collections::{BTreeSet, VecDeque};

use mano_core::{
    distance, CanvasSize, Color, Frame, GameEvent, GameKind, Paint, Point2, RenderList, Shape,
    ShapeKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::machine::{hud_line, HUD_SIZE};
use crate::{GameMachine, TickOutput};

/// ShapeTrace configuration
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Checkpoints per shape
    pub checkpoints: usize,
    /// Fraction of checkpoints needed to complete
    pub completion_ratio: f64,
    /// Circle radius / square half side, as a fraction of the shorter canvas side
    pub extent_ratio: f32,
    /// Distance from the outline that starts tracing (pixels)
    pub outline_tolerance: f32,
    /// Distance from a checkpoint that counts as a hit (pixels)
    pub checkpoint_tolerance: f32,
    /// Trail points kept for rendering
    pub trail_capacity: usize,
    /// Shapes to pick from
    pub shapes: Vec<ShapeKind>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            checkpoints: 16,
            completion_ratio: 0.9,
            extent_ratio: 0.3,
            outline_tolerance: 20.0,
            checkpoint_tolerance: 20.0,
            trail_capacity: 256,
            shapes: vec![ShapeKind::Circle, ShapeKind::Square],
        }
    }
}

impl TraceConfig {
    /// Wider tolerances
    pub fn relaxed() -> Self {
        TraceConfig {
            outline_tolerance: 30.0,
            checkpoint_tolerance: 28.0,
            ..Self::default()
        }
    }

    /// Hits required for completion: `ceil(ratio × checkpoints)`
    pub fn required_hits(&self) -> usize {
        let exact = self.checkpoints as f64 * self.completion_ratio;
        ((exact - 1e-9).ceil().max(0.0) as usize).min(self.checkpoints)
    }
}

/// One laid-out shape and its progress
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRound {
    pub shape: Shape,
    pub checkpoints: Vec<Point2>,
    /// Write-once set of hit checkpoint indices
    pub hits: BTreeSet<usize>,
    /// Has the fingertip reached the outline yet
    pub tracing: bool,
    /// Fingertip samples since tracing began
    pub trail: VecDeque<Point2>,
}

/// Observable phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    NoShape,
    /// Shape laid out, fingertip has not touched the outline yet
    AwaitingOutline,
    Tracing,
}

/// ShapeTrace game
#[derive(Debug)]
pub struct ShapeTrace {
    config: TraceConfig,
    rng: StdRng,
    round: Option<ShapeRound>,
    completed: u64,
}

impl ShapeTrace {
    pub fn new(config: TraceConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: TraceConfig, rng: StdRng) -> Self {
        ShapeTrace {
            config,
            rng,
            round: None,
            completed: 0,
        }
    }

    pub fn phase(&self) -> TracePhase {
        match &self.round {
            None => TracePhase::NoShape,
            Some(round) if round.tracing => TracePhase::Tracing,
            Some(_) => TracePhase::AwaitingOutline,
        }
    }

    pub fn round(&self) -> Option<&ShapeRound> {
        self.round.as_ref()
    }

    pub fn hit_count(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.hits.len())
    }

    /// Shapes completed so far
    pub fn completed(&self) -> u64 {
        self.completed
    }

    fn lay_out(&mut self, canvas: CanvasSize) -> ShapeRound {
        let kind = if self.config.shapes.is_empty() {
            ShapeKind::Circle
        } else {
            let i = self.rng.gen_range(0..self.config.shapes.len());
            self.config.shapes[i]
        };
        let extent = canvas.min_side() * self.config.extent_ratio;
        let shape = Shape::from_kind(kind, canvas.center(), extent);

        ShapeRound {
            checkpoints: shape.perimeter_sample(self.config.checkpoints),
            shape,
            hits: BTreeSet::new(),
            tracing: false,
            trail: VecDeque::with_capacity(self.config.trail_capacity),
        }
    }

    /// Mark every checkpoint within tolerance of `p`; returns newly hit
    /// indices. Already-hit checkpoints are ignored.
    pub fn test_checkpoints(&mut self, p: Point2) -> Vec<usize> {
        let tolerance = self.config.checkpoint_tolerance;
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };

        let mut fresh = Vec::new();
        for (i, checkpoint) in round.checkpoints.iter().enumerate() {
            if distance(p, *checkpoint) < tolerance && round.hits.insert(i) {
                fresh.push(i);
            }
        }
        fresh
    }

    fn render(&self, frame: &Frame, render: &mut RenderList) {
        match &self.round {
            Some(round) => {
                let outline = Paint::stroke(Color::Outline, 3.0);
                match round.shape {
                    Shape::Circle { center, radius } => render.circle(center, radius, outline),
                    Shape::Square { center, size } => render.square(center, size, outline),
                }
                for (i, checkpoint) in round.checkpoints.iter().enumerate() {
                    let color = if round.hits.contains(&i) {
                        Color::CheckpointHit
                    } else {
                        Color::Checkpoint
                    };
                    render.circle(*checkpoint, 6.0, Paint::fill(color));
                }
                render.polyline(
                    round.trail.iter().copied().collect(),
                    Paint::stroke(Color::Trail, 4.0),
                );
                let text = format!(
                    "Trace the {}: {}/{}",
                    round.shape.kind().as_str(),
                    round.hits.len(),
                    self.config.required_hits()
                );
                render.text(hud_line(0), text, HUD_SIZE);
            }
            None => render.text(hud_line(0), "Shape complete!", HUD_SIZE),
        }
        if let Some(tip) = frame.fingertip() {
            render.cursor(tip);
        }
    }
}

impl GameMachine for ShapeTrace {
    fn kind(&self) -> GameKind {
        GameKind::ShapeTrace
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        let mut events = Vec::new();
        let mut scored = false;

        if self.round.is_none() {
            let round = self.lay_out(frame.canvas);
            debug!(shape = round.shape.kind().as_str(), "shape laid out");
            events.push(GameEvent::ShapeStarted {
                kind: round.shape.kind(),
            });
            self.round = Some(round);
        }

        if let Some(tip) = frame.fingertip() {
            let tolerance = self.config.outline_tolerance;
            let capacity = self.config.trail_capacity;

            let tracing = match self.round.as_mut() {
                Some(round) if round.tracing => true,
                Some(round) if round.shape.contains_on_outline(tip, tolerance) => {
                    round.tracing = true;
                    events.push(GameEvent::TracingStarted);
                    true
                }
                _ => false,
            };

            if tracing {
                if let Some(round) = self.round.as_mut() {
                    if round.trail.len() >= capacity {
                        round.trail.pop_front();
                    }
                    round.trail.push_back(tip);
                }

                for index in self.test_checkpoints(tip) {
                    events.push(GameEvent::CheckpointHit { index });
                }

                if self.hit_count() >= self.config.required_hits() {
                    self.completed += 1;
                    self.round = None;
                    scored = true;
                    info!(completed = self.completed, "shape completed");
                    events.push(GameEvent::ShapeCompleted);
                }
            }
        }

        let mut render = RenderList::new();
        self.render(frame, &mut render);
        TickOutput::new(scored, render, events)
    }
}
