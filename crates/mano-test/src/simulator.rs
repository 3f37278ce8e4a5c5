//! Game simulator - runs a game over a scripted timeline without a runtime

use mano_core::{Frame, FrameTime, GameEvent, GameKind};
use mano_games::{Game, GameConfig, GameMachine, TickOutput};

use crate::timeline::Timeline;

/// Everything a simulation produced
#[derive(Clone, Debug, Default)]
pub struct SimulationResult {
    pub ticks: u64,
    pub ticks_with_hand: u64,
    /// Sum of score deltas
    pub score: u64,
    /// Timestamps of the scoring ticks
    pub score_times: Vec<FrameTime>,
    pub events: Vec<(FrameTime, GameEvent)>,
    /// Ticks that produced no draw commands
    pub blank_ticks: u64,
}

impl SimulationResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, frame: &Frame, out: &TickOutput) {
        self.ticks += 1;
        if frame.has_hand() {
            self.ticks_with_hand += 1;
        }
        if out.scored() {
            self.score += u64::from(out.score_delta);
            self.score_times.push(frame.timestamp);
        }
        if out.commands.is_empty() {
            self.blank_ticks += 1;
        }
        self.events
            .extend(out.events.iter().cloned().map(|e| (frame.timestamp, e)));
    }

    /// Number of events matching `pred`
    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }

    pub fn first_score(&self) -> Option<FrameTime> {
        self.score_times.first().copied()
    }
}

/// Drives one game frame by frame
#[derive(Debug)]
pub struct GameSimulator {
    game: Game,
    result: SimulationResult,
}

impl GameSimulator {
    pub fn new(kind: GameKind, seed: u64) -> Self {
        Self::from_game(Game::new(kind, seed))
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self::from_game(Game::with_config(config, seed))
    }

    pub fn from_game(game: Game) -> Self {
        GameSimulator {
            game,
            result: SimulationResult::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    /// Advance one frame
    pub fn step(&mut self, frame: &Frame) -> TickOutput {
        let out = self.game.advance(frame);
        self.result.record(frame, &out);
        out
    }

    /// Play a whole timeline; returns the accumulated result
    pub fn run(&mut self, timeline: &Timeline) -> SimulationResult {
        for frame in timeline.frames() {
            self.step(&frame);
        }
        self.result.clone()
    }

    /// Clear the accumulated result, keeping the game state
    pub fn reset_result(&mut self) {
        self.result = SimulationResult::new();
    }
}
