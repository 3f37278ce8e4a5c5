//! Game machine contract and the six-variant game sum type

use mano_core::{Frame, GameEvent, GameKind, Point2, RenderCommand, RenderList};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    BallConfig, DirectionalSwipe, GestureSequenceConfig, PoseMatch, PoseMatchConfig,
    ReactionConfig, ReactionTarget, SequenceRecallBalls, SequenceRecallGestures, ShapeTrace,
    SwipeConfig, TraceConfig,
};

/// HUD text anchor (top-left)
pub(crate) const HUD_ORIGIN: Point2 = Point2 { x: 16.0, y: 28.0 };
/// HUD line height
pub(crate) const HUD_LINE: f32 = 24.0;
/// HUD font size
pub(crate) const HUD_SIZE: f32 = 18.0;

pub(crate) fn hud_line(n: usize) -> Point2 {
    HUD_ORIGIN.offset(0.0, HUD_LINE * n as f32)
}

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutput {
    /// 0 or 1
    pub score_delta: u8,
    /// Draw list for this tick
    pub commands: Vec<RenderCommand>,
    /// Discrete events of this tick
    pub events: Vec<GameEvent>,
}

impl TickOutput {
    pub fn new(scored: bool, render: RenderList, events: Vec<GameEvent>) -> Self {
        Self {
            score_delta: u8::from(scored),
            commands: render.into_commands(),
            events,
        }
    }

    pub fn scored(&self) -> bool {
        self.score_delta > 0
    }
}

/// Common per-tick contract of every game
pub trait GameMachine {
    /// Which game this is
    fn kind(&self) -> GameKind;

    /// Advance one tick. `frame.timestamp` is "now".
    fn advance(&mut self, frame: &Frame) -> TickOutput;
}

/// Configuration for any of the six games
#[derive(Debug, Clone)]
pub enum GameConfig {
    ReactionTarget(ReactionConfig),
    ShapeTrace(TraceConfig),
    SequenceRecallBalls(BallConfig),
    SequenceRecallGestures(GestureSequenceConfig),
    DirectionalSwipe(SwipeConfig),
    PoseMatch(PoseMatchConfig),
}

impl GameConfig {
    /// Default configuration for a game kind
    pub fn default_for(kind: GameKind) -> Self {
        match kind {
            GameKind::ReactionTarget => GameConfig::ReactionTarget(ReactionConfig::default()),
            GameKind::ShapeTrace => GameConfig::ShapeTrace(TraceConfig::default()),
            GameKind::SequenceRecallBalls => GameConfig::SequenceRecallBalls(BallConfig::default()),
            GameKind::SequenceRecallGestures => {
                GameConfig::SequenceRecallGestures(GestureSequenceConfig::default())
            }
            GameKind::DirectionalSwipe => GameConfig::DirectionalSwipe(SwipeConfig::default()),
            GameKind::PoseMatch => GameConfig::PoseMatch(PoseMatchConfig::default()),
        }
    }

    /// Slower-paced configuration for a game kind
    pub fn relaxed_for(kind: GameKind) -> Self {
        match kind {
            GameKind::ReactionTarget => GameConfig::ReactionTarget(ReactionConfig::relaxed()),
            GameKind::ShapeTrace => GameConfig::ShapeTrace(TraceConfig::relaxed()),
            GameKind::SequenceRecallBalls => GameConfig::SequenceRecallBalls(BallConfig::relaxed()),
            GameKind::SequenceRecallGestures => {
                GameConfig::SequenceRecallGestures(GestureSequenceConfig::relaxed())
            }
            GameKind::DirectionalSwipe => GameConfig::DirectionalSwipe(SwipeConfig::relaxed()),
            GameKind::PoseMatch => GameConfig::PoseMatch(PoseMatchConfig::relaxed()),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::ReactionTarget(_) => GameKind::ReactionTarget,
            GameConfig::ShapeTrace(_) => GameKind::ShapeTrace,
            GameConfig::SequenceRecallBalls(_) => GameKind::SequenceRecallBalls,
            GameConfig::SequenceRecallGestures(_) => GameKind::SequenceRecallGestures,
            GameConfig::DirectionalSwipe(_) => GameKind::DirectionalSwipe,
            GameConfig::PoseMatch(_) => GameKind::PoseMatch,
        }
    }
}

/// Any of the six games, owned by exactly one session
#[derive(Debug)]
pub enum Game {
    ReactionTarget(ReactionTarget),
    ShapeTrace(ShapeTrace),
    SequenceRecallBalls(SequenceRecallBalls),
    SequenceRecallGestures(SequenceRecallGestures),
    DirectionalSwipe(DirectionalSwipe),
    PoseMatch(PoseMatch),
}

impl Game {
    /// Fresh game with default configuration and a deterministic seed
    pub fn new(kind: GameKind, seed: u64) -> Self {
        Self::with_config(GameConfig::default_for(kind), seed)
    }

    /// Fresh game with a deterministic seed
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Fresh game seeded from OS entropy
    pub fn from_entropy(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        match config {
            GameConfig::ReactionTarget(c) => Game::ReactionTarget(ReactionTarget::with_rng(c, rng)),
            GameConfig::ShapeTrace(c) => Game::ShapeTrace(ShapeTrace::with_rng(c, rng)),
            GameConfig::SequenceRecallBalls(c) => {
                Game::SequenceRecallBalls(SequenceRecallBalls::with_rng(c, rng))
            }
            GameConfig::SequenceRecallGestures(c) => {
                Game::SequenceRecallGestures(SequenceRecallGestures::with_rng(c, rng))
            }
            GameConfig::DirectionalSwipe(c) => {
                Game::DirectionalSwipe(DirectionalSwipe::with_rng(c, rng))
            }
            GameConfig::PoseMatch(c) => Game::PoseMatch(PoseMatch::with_rng(c, rng)),
        }
    }

    fn machine(&mut self) -> &mut dyn GameMachine {
        match self {
            Game::ReactionTarget(g) => g,
            Game::ShapeTrace(g) => g,
            Game::SequenceRecallBalls(g) => g,
            Game::SequenceRecallGestures(g) => g,
            Game::DirectionalSwipe(g) => g,
            Game::PoseMatch(g) => g,
        }
    }
}

impl GameMachine for Game {
    fn kind(&self) -> GameKind {
        match self {
            Game::ReactionTarget(g) => g.kind(),
            Game::ShapeTrace(g) => g.kind(),
            Game::SequenceRecallBalls(g) => g.kind(),
            Game::SequenceRecallGestures(g) => g.kind(),
            Game::DirectionalSwipe(g) => g.kind(),
            Game::PoseMatch(g) => g.kind(),
        }
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        self.machine().advance(frame)
    }
}
