//! Cross-variant scenarios
//!
//! Each scenario plays one well-known situation against a real game and
//! reports what happened. The tests below pin the expected outcomes.

use std::time::Duration;

use mano_core::{
    CanvasSize, Frame, FrameTime, GameKind, GestureLabel, ManoResult, Point2, ShapeKind,
    SwipeDirection,
};
use mano_games::{Game, GameConfig, TraceConfig};
use mano_runtime::{GameSession, NullRenderSink, ScoreTally, SessionReport};

use crate::hands::{pose_hand, touch_hand};
use crate::scripted::{ScriptedDetector, ScriptedSource};
use crate::simulator::{GameSimulator, SimulationResult};
use crate::timeline::Timeline;

fn canvas() -> CanvasSize {
    CanvasSize::default()
}

fn empty(t: u64) -> Frame {
    Frame::empty(FrameTime::from_millis(t), canvas())
}

fn touch(t: u64, pixel: Point2) -> Frame {
    Frame::with_hand(FrameTime::from_millis(t), canvas(), touch_hand(pixel, canvas()))
}

fn posed(t: u64, label: GestureLabel) -> Frame {
    Frame::with_hand(FrameTime::from_millis(t), canvas(), pose_hand(label))
}

/// Outcome of [`reaction_scenario`]
#[derive(Clone, Debug)]
pub struct ReactionOutcome {
    pub result: SimulationResult,
    pub reaction: Option<Duration>,
}

/// Spawn a target at t=0 and touch its center after `reaction_ms`
pub fn reaction_scenario(seed: u64, reaction_ms: u64) -> ReactionOutcome {
    let mut sim = GameSimulator::new(GameKind::ReactionTarget, seed);
    sim.step(&empty(0));

    let center = match sim.game() {
        Game::ReactionTarget(g) => g.target().map(|t| t.center),
        _ => None,
    };
    if let Some(center) = center {
        sim.step(&touch(reaction_ms, center));
    }

    let reaction = match sim.game() {
        Game::ReactionTarget(g) => g.last_reaction(),
        _ => None,
    };
    ReactionOutcome {
        result: sim.result().clone(),
        reaction,
    }
}

/// Lay out a circle and touch its checkpoints in order, one per frame.
/// Returns the result and the 1-based checkpoint count at the first score.
pub fn circle_sweep_scenario(seed: u64) -> (SimulationResult, Option<usize>) {
    let config = TraceConfig {
        shapes: vec![ShapeKind::Circle],
        ..TraceConfig::default()
    };
    let mut sim = GameSimulator::with_config(GameConfig::ShapeTrace(config), seed);
    sim.step(&empty(0));

    let checkpoints = match sim.game() {
        Game::ShapeTrace(g) => g.round().map(|r| r.checkpoints.clone()),
        _ => None,
    }
    .unwrap_or_default();

    let mut scored_on = None;
    for (i, p) in checkpoints.iter().enumerate() {
        let out = sim.step(&touch(33 * (i as u64 + 1), *p));
        if out.scored() && scored_on.is_none() {
            scored_on = Some(i + 1);
        }
    }
    (sim.result().clone(), scored_on)
}

/// Outcome of [`ball_wrong_tap_scenario`]
#[derive(Clone, Debug, PartialEq)]
pub struct BallReset {
    pub layout_before: Vec<Point2>,
    pub layout_after: Vec<Point2>,
    pub sequence_len: usize,
    pub input_index: usize,
    pub score: u64,
}

/// Wait for input, tap a wrong ball and let the feedback window close
pub fn ball_wrong_tap_scenario(seed: u64) -> Option<BallReset> {
    let mut sim = GameSimulator::new(GameKind::SequenceRecallBalls, seed);
    sim.step(&empty(0));
    sim.step(&empty(900));

    let (layout_before, wrong) = match sim.game() {
        Game::SequenceRecallBalls(g) => {
            let expected = *g.sequence().first()?;
            let wrong = (expected + 1) % g.balls().len();
            (g.balls().to_vec(), wrong)
        }
        _ => return None,
    };

    sim.step(&touch(1_000, layout_before[wrong]));
    sim.step(&empty(1_500));

    match sim.game() {
        Game::SequenceRecallBalls(g) => Some(BallReset {
            layout_before,
            layout_after: g.balls().to_vec(),
            sequence_len: g.sequence().len(),
            input_index: g.input_index(),
            score: sim.result().score,
        }),
        _ => None,
    }
}

/// First seed whose opening PoseMatch prompt is `prompt`
pub fn seed_with_pose_prompt(prompt: GestureLabel, max_seed: u64) -> Option<u64> {
    (0..max_seed).find(|seed| {
        let mut game = Game::new(GameKind::PoseMatch, *seed);
        mano_games::GameMachine::advance(&mut game, &empty(0));
        matches!(&game, Game::PoseMatch(g) if g.prompt() == Some(prompt))
    })
}

/// Outcome of [`pose_match_scenario`]
#[derive(Clone, Debug, PartialEq)]
pub struct PoseOutcome {
    pub scored: bool,
    pub round_restarted: bool,
}

/// Show `shown` to a PoseMatch round prompting `prompt`, 1 s in
pub fn pose_match_scenario(prompt: GestureLabel, shown: GestureLabel) -> Option<PoseOutcome> {
    let seed = seed_with_pose_prompt(prompt, 500)?;
    let mut sim = GameSimulator::new(GameKind::PoseMatch, seed);
    sim.step(&empty(0));
    let out = sim.step(&posed(1_000, shown));

    // a restarted round shows the full round time again
    let restarted = out.commands.iter().any(|c| {
        matches!(c, mano_core::RenderCommand::Text { text, .. } if text == "Time: 5s")
    });
    Some(PoseOutcome {
        scored: out.scored(),
        round_restarted: restarted,
    })
}

/// Swipe by `(dx, dy)` pixels from the canvas center; returns the detected
/// direction and whether it scored
pub fn swipe_scenario(seed: u64, dx: f32, dy: f32) -> Option<(SwipeDirection, bool)> {
    let mut sim = GameSimulator::new(GameKind::DirectionalSwipe, seed);
    sim.step(&empty(0));

    let start = canvas().center();
    sim.step(&touch(33, start));
    let out = sim.step(&touch(66, start.offset(dx, dy)));

    match sim.game() {
        Game::DirectionalSwipe(g) => g.last_swipe().map(|(d, _)| (d, out.scored())),
        _ => None,
    }
}

/// Run a full session over a timeline; returns the report and final score
pub async fn session_scenario(
    kind: GameKind,
    seed: u64,
    timeline: &Timeline,
) -> ManoResult<(SessionReport, u64)> {
    let tally = ScoreTally::new();
    let mut session = GameSession::new(
        Game::new(kind, seed),
        ScriptedSource::from_timeline(timeline),
        ScriptedDetector::new(),
        tally.clone(),
        NullRenderSink,
    );
    let report = session.run().await?;
    Ok((report, tally.score()))
}
