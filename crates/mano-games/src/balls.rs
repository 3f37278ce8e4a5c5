//! SequenceRecallBalls - repeat a growing sequence of flashed balls
//!
//! Phases:
//! - Init: lay out the balls, start a one-element sequence
//! - Show: flash each sequence element, then a short gap
//! - Input: the player touches the balls in order
//!
//! Every touch opens a feedback window. A correct touch advances the input
//! cursor when the window closes; a full match scores, grows the sequence by
//! one and replays it. A wrong touch re-lays out everything from Init once
//! the window closes. The session score is external and unaffected.

use std::time::Duration;

use mano_core::{
    distance, point_in_circle, CanvasSize, Color, Frame, FrameTime, GameEvent, GameKind, Paint,
    Point2, RenderList,
};
use mano_time::PendingTransition;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::machine::{hud_line, HUD_SIZE};
use crate::{GameMachine, TickOutput};

/// SequenceRecallBalls configuration
#[derive(Debug, Clone)]
pub struct BallConfig {
    pub ball_count: usize,
    /// Ball radius in pixels
    pub ball_radius: f32,
    /// How long each sequence element is lit
    pub flash_time: Duration,
    /// Gap after each flash
    pub wait_time: Duration,
    /// Feedback window after a touch
    pub feedback_time: Duration,
    /// Minimum center distance between balls, in radii
    pub min_separation: f32,
    /// Placement attempts per ball before accepting an overlap
    pub placement_attempts: usize,
}

impl Default for BallConfig {
    fn default() -> Self {
        BallConfig {
            ball_count: 4,
            ball_radius: 45.0,
            flash_time: Duration::from_millis(600),
            wait_time: Duration::from_millis(300),
            feedback_time: Duration::from_millis(500),
            min_separation: 2.5,
            placement_attempts: 64,
        }
    }
}

impl BallConfig {
    /// Longer flashes
    pub fn relaxed() -> Self {
        BallConfig {
            flash_time: Duration::from_millis(900),
            wait_time: Duration::from_millis(450),
            feedback_time: Duration::from_millis(700),
            ..Self::default()
        }
    }

    fn step_time(&self) -> Duration {
        self.flash_time + self.wait_time
    }
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Init,
    /// Replaying `sequence[step]`, which started at `step_start`
    Show { step: usize, step_start: FrameTime },
    Input,
}

/// A registered touch awaiting its feedback window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchOutcome {
    pub ball: usize,
    pub correct: bool,
}

/// SequenceRecallBalls game
#[derive(Debug)]
pub struct SequenceRecallBalls {
    config: BallConfig,
    rng: StdRng,
    phase: BallPhase,
    balls: Vec<Point2>,
    sequence: Vec<usize>,
    input_index: usize,
    feedback: PendingTransition<TouchOutcome>,
    /// Ball of the last registered touch, until the finger leaves all balls
    held_ball: Option<usize>,
    /// Sequences completed since the last layout, for display
    streak: u32,
    layouts: u64,
}

impl SequenceRecallBalls {
    pub fn new(config: BallConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: BallConfig, rng: StdRng) -> Self {
        SequenceRecallBalls {
            config,
            rng,
            phase: BallPhase::Init,
            balls: Vec::new(),
            sequence: Vec::new(),
            input_index: 0,
            feedback: PendingTransition::new(),
            held_ball: None,
            streak: 0,
            layouts: 0,
        }
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn balls(&self) -> &[Point2] {
        &self.balls
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn input_index(&self) -> usize {
        self.input_index
    }

    pub fn pending_feedback(&self) -> Option<TouchOutcome> {
        self.feedback.peek().copied()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Number of layouts generated so far
    pub fn layouts(&self) -> u64 {
        self.layouts
    }

    /// Ball currently lit during Show
    pub fn lit_ball(&self, now: FrameTime) -> Option<usize> {
        match self.phase {
            BallPhase::Show { step, step_start } if now - step_start < self.config.flash_time => {
                self.sequence.get(step).copied()
            }
            _ => None,
        }
    }

    fn random_ball(&mut self) -> usize {
        self.rng.gen_range(0..self.config.ball_count.max(1))
    }

    fn random_position(&mut self, canvas: CanvasSize) -> Point2 {
        let r = self.config.ball_radius;
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

    /// Rejection-sample ball centers at least `min_separation` radii apart
    fn place_balls(&mut self, canvas: CanvasSize) -> Vec<Point2> {
        let min_gap = self.config.min_separation * self.config.ball_radius;
        let mut balls: Vec<Point2> = Vec::with_capacity(self.config.ball_count);

        for _ in 0..self.config.ball_count {
            let mut candidate = self.random_position(canvas);
            for _ in 1..self.config.placement_attempts {
                if balls.iter().all(|b| distance(*b, candidate) >= min_gap) {
                    break;
                }
                candidate = self.random_position(canvas);
            }
            balls.push(candidate);
        }
        balls
    }

    /// Init: fresh layout, one-element sequence, then Show
    fn initialize(&mut self, now: FrameTime, canvas: CanvasSize, events: &mut Vec<GameEvent>) {
        self.balls = self.place_balls(canvas);
        let first = self.random_ball();
        self.sequence = vec![first];
        self.input_index = 0;
        self.streak = 0;
        self.feedback.cancel();
        self.layouts += 1;
        self.phase = BallPhase::Show {
            step: 0,
            step_start: now,
        };
        debug!(%now, layout = self.layouts, "balls laid out");
        events.push(GameEvent::LayoutReset);
    }

    fn ball_under(&self, p: Point2) -> Option<usize> {
        let r = self.config.ball_radius;
        self.balls.iter().position(|b| point_in_circle(p, *b, r))
    }

    fn resolve_feedback(
        &mut self,
        now: FrameTime,
        canvas: CanvasSize,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let Some(outcome) = self.feedback.poll(now) else {
            return false;
        };

        if !outcome.correct {
            debug!(%now, ball = outcome.ball, "wrong ball, re-laying out");
            self.initialize(now, canvas, events);
            return false;
        }

        self.input_index += 1;
        events.push(GameEvent::StepMatched {
            cursor: self.input_index,
        });
        if self.input_index < self.sequence.len() {
            return false;
        }

        let length = self.sequence.len();
        let next = self.random_ball();
        self.sequence.push(next);
        self.input_index = 0;
        self.streak += 1;
        self.phase = BallPhase::Show {
            step: 0,
            step_start: now,
        };
        info!(length, streak = self.streak, "ball sequence completed");
        events.push(GameEvent::SequenceCompleted { length });
        true
    }

    fn advance_show(&mut self, now: FrameTime) {
        let BallPhase::Show {
            mut step,
            mut step_start,
        } = self.phase
        else {
            return;
        };

        let step_time = self.config.step_time();
        while step < self.sequence.len() && now - step_start >= step_time {
            step += 1;
            step_start = step_start + step_time;
        }

        self.phase = if step >= self.sequence.len() {
            self.input_index = 0;
            BallPhase::Input
        } else {
            BallPhase::Show { step, step_start }
        };
    }

    fn register_touch(&mut self, now: FrameTime, under: Option<usize>, events: &mut Vec<GameEvent>) {
        let Some(ball) = under else {
            return;
        };
        if self.phase != BallPhase::Input || self.feedback.is_pending() || self.held_ball == Some(ball) {
            return;
        }

        let correct = self.sequence.get(self.input_index) == Some(&ball);
        let outcome = TouchOutcome { ball, correct };
        if self.feedback.schedule(now, self.config.feedback_time, outcome) {
            self.held_ball = Some(ball);
            debug!(%now, ball, correct, "ball touched");
            events.push(GameEvent::BallTouched {
                index: ball,
                correct,
            });
        }
    }

    fn render(&self, frame: &Frame, render: &mut RenderList) {
        let now = frame.timestamp;
        let lit = self.lit_ball(now);
        let feedback = self.pending_feedback();

        for (i, center) in self.balls.iter().enumerate() {
            let color = match feedback {
                Some(TouchOutcome { ball, correct }) if ball == i => {
                    if correct {
                        Color::Success
                    } else {
                        Color::Failure
                    }
                }
                _ if lit == Some(i) => Color::Highlight,
                _ => Color::Idle,
            };
            render.circle(*center, self.config.ball_radius, Paint::fill(color));
        }

        let prompt = match self.phase {
            BallPhase::Init => "Get ready",
            BallPhase::Show { .. } => "Watch...",
            BallPhase::Input => "Your turn!",
        };
        render.text(hud_line(0), prompt, HUD_SIZE);
        render.text(hud_line(1), format!("Round: {}", self.streak), HUD_SIZE);

        if let Some(tip) = frame.fingertip() {
            render.cursor(tip);
        }
    }
}

impl GameMachine for SequenceRecallBalls {
    fn kind(&self) -> GameKind {
        GameKind::SequenceRecallBalls
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        let now = frame.timestamp;
        let mut events = Vec::new();

        if self.phase == BallPhase::Init {
            self.initialize(now, frame.canvas, &mut events);
        }

        let scored = self.resolve_feedback(now, frame.canvas, &mut events);
        self.advance_show(now);

        if let Some(tip) = frame.fingertip() {
            let under = self.ball_under(tip);
            if under.is_none() {
                self.held_ball = None;
            }
            self.register_touch(now, under, &mut events);
        }

        let mut render = RenderList::new();
        self.render(frame, &mut render);
        TickOutput::new(scored, render, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mano_core::HandLandmarks;

    fn canvas() -> CanvasSize {
        CanvasSize::new(640.0, 480.0)
    }

    fn empty(t: u64) -> Frame {
        Frame::empty(FrameTime::from_millis(t), canvas())
    }

    fn touch(t: u64, at: Point2) -> Frame {
        let hand = HandLandmarks::uniform(canvas().to_normalized(at));
        Frame::with_hand(FrameTime::from_millis(t), canvas(), hand)
    }

    /// A point on no ball
    fn away(game: &SequenceRecallBalls) -> Point2 {
        let r = BallConfig::default().ball_radius;
        [
            Point2::new(1.0, 1.0),
            Point2::new(639.0, 1.0),
            Point2::new(1.0, 479.0),
            Point2::new(639.0, 479.0),
        ]
        .into_iter()
        .find(|p| game.balls().iter().all(|b| distance(*b, *p) >= r))
        .unwrap()
    }

    /// Start a game and run the first Show through to Input
    fn started(seed: u64) -> SequenceRecallBalls {
        let mut game = SequenceRecallBalls::new(BallConfig::default(), seed);
        game.advance(&empty(0));
        game.advance(&empty(900));
        assert_eq!(game.phase(), BallPhase::Input);
        game
    }

    #[test]
    fn test_init_lays_out_separated_balls() {
        let mut game = SequenceRecallBalls::new(BallConfig::default(), 21);
        let out = game.advance(&empty(0));

        assert_eq!(out.events, vec![GameEvent::LayoutReset]);
        assert_eq!(game.balls().len(), 4);
        assert_eq!(game.sequence().len(), 1);
        assert!(matches!(game.phase(), BallPhase::Show { step: 0, .. }));
        for (i, a) in game.balls().iter().enumerate() {
            for b in &game.balls()[i + 1..] {
                assert!(distance(*a, *b) >= 2.5 * 45.0);
            }
        }
    }

    #[test]
    fn test_show_flashes_then_waits() {
        let mut game = SequenceRecallBalls::new(BallConfig::default(), 22);
        game.advance(&empty(0));
        let first = game.sequence()[0];

        assert_eq!(game.lit_ball(FrameTime::from_millis(100)), Some(first));
        game.advance(&empty(650));
        assert_eq!(game.lit_ball(FrameTime::from_millis(650)), None);
        assert!(matches!(game.phase(), BallPhase::Show { .. }));

        game.advance(&empty(900));
        assert_eq!(game.phase(), BallPhase::Input);
    }

    #[test]
    fn test_touch_during_show_ignored() {
        let mut game = SequenceRecallBalls::new(BallConfig::default(), 23);
        game.advance(&empty(0));
        let ball = game.balls()[game.sequence()[0]];

        let out = game.advance(&touch(100, ball));
        assert!(out.events.is_empty());
        assert!(game.pending_feedback().is_none());
    }

    #[test]
    fn test_correct_sequence_scores_and_grows() {
        let mut game = started(24);
        let target = game.balls()[game.sequence()[0]];

        let out = game.advance(&touch(1_000, target));
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.score_delta, 0);

        let out = game.advance(&touch(1_499, target));
        assert_eq!(out.score_delta, 0);

        let out = game.advance(&touch(1_500, target));
        assert_eq!(out.score_delta, 1);
        assert_eq!(game.sequence().len(), 2);
        assert_eq!(game.input_index(), 0);
        assert_eq!(game.streak(), 1);
        assert!(matches!(game.phase(), BallPhase::Show { step: 0, .. }));
        assert_eq!(game.layouts(), 1);
    }

    #[test]
    fn test_wrong_touch_relays_out_after_feedback() {
        let mut game = started(25);
        let layout = game.balls().to_vec();
        let wrong = (game.sequence()[0] + 1) % 4;

        let out = game.advance(&touch(1_000, layout[wrong]));
        assert_eq!(
            out.events,
            vec![GameEvent::BallTouched {
                index: wrong,
                correct: false
            }]
        );

        // still in the feedback window: nothing changes, second touch ignored
        let other = (wrong + 1) % 4;
        let out = game.advance(&touch(1_200, layout[other]));
        assert!(out.events.is_empty());
        assert_eq!(game.layouts(), 1);

        let out = game.advance(&empty(1_500));
        assert_eq!(out.score_delta, 0);
        assert!(out.events.contains(&GameEvent::LayoutReset));
        assert_eq!(game.layouts(), 2);
        assert_ne!(game.balls(), layout.as_slice());
        assert_eq!(game.sequence().len(), 1);
        assert_eq!(game.input_index(), 0);
        assert!(matches!(game.phase(), BallPhase::Show { step: 0, .. }));
    }

    #[test]
    fn test_held_touch_registers_once() {
        let mut game = started(26);
        let target = game.balls()[game.sequence()[0]];

        let mut touches = 0;
        for t in (1_000..1_400).step_by(33) {
            let out = game.advance(&touch(t, target));
            touches += out
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::BallTouched { .. }))
                .count();
        }
        assert_eq!(touches, 1);
    }

    #[test]
    fn test_finger_must_leave_ball_before_next_touch() {
        let mut game = started(27);
        // complete round one so the sequence has two elements
        let first = game.balls()[game.sequence()[0]];
        game.advance(&touch(1_000, first));
        game.advance(&touch(1_500, first));
        assert_eq!(game.sequence().len(), 2);

        // replay: two elements, 900ms each
        let spot = away(&game);
        game.advance(&touch(3_300, spot));
        assert_eq!(game.phase(), BallPhase::Input);

        let a = game.balls()[game.sequence()[0]];
        let b = game.balls()[game.sequence()[1]];
        game.advance(&touch(3_400, a));
        game.advance(&touch(3_900, a)); // feedback resolves, finger still on a
        assert_eq!(game.input_index(), 1);

        if game.sequence()[0] == game.sequence()[1] {
            // resting on the same ball does not count twice
            let out = game.advance(&touch(3_950, a));
            assert!(out.events.is_empty());
            game.advance(&touch(4_000, spot));
        }
        let out = game.advance(&touch(4_050, b));
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BallTouched { correct: true, .. })));
    }

    #[test]
    fn test_slide_to_next_ball_registers_after_window() {
        let mut game = started(29);
        game.sequence = vec![0, 1];
        let a = game.balls()[0];
        let b = game.balls()[1];

        game.advance(&touch(1_000, a));
        // onto b while a's feedback is still pending
        let out = game.advance(&touch(1_200, b));
        assert!(out.events.is_empty());

        let out = game.advance(&touch(1_500, b));
        assert_eq!(game.input_index(), 1);
        assert!(out.events.contains(&GameEvent::BallTouched {
            index: 1,
            correct: true
        }));

        // resting on b does not register it again
        let mut again = 0;
        for t in (1_533..3_000).step_by(33) {
            let out = game.advance(&touch(t, b));
            again += out
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::BallTouched { .. }))
                .count();
        }
        assert_eq!(again, 0);
    }

    #[test]
    fn test_missing_hand_keeps_state() {
        let mut game = started(28);
        let target = game.balls()[game.sequence()[0]];
        game.advance(&touch(1_000, target));

        let seq = game.sequence().to_vec();
        let out = game.advance(&empty(1_100));
        assert_eq!(out.score_delta, 0);
        assert_eq!(game.sequence(), seq.as_slice());
        assert_eq!(game.input_index(), 0);
        assert!(game.pending_feedback().is_some());
    }
}
