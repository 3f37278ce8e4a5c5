//! PoseMatch - hold the prompted hand pose before time runs out

use std::time::Duration;

use mano_core::{Frame, FrameTime, GameEvent, GameKind, GestureLabel, RenderList};
use mano_gesture::{ClassifierConfig, GestureClassifier};
use mano_time::RoundTimer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::machine::{hud_line, HUD_SIZE};
use crate::{GameMachine, TickOutput};

/// PoseMatch configuration
#[derive(Debug, Clone)]
pub struct PoseMatchConfig {
    pub round_time: Duration,
    pub classifier: ClassifierConfig,
}

impl Default for PoseMatchConfig {
    fn default() -> Self {
        PoseMatchConfig {
            round_time: Duration::from_secs(5),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl PoseMatchConfig {
    pub fn relaxed() -> Self {
        PoseMatchConfig {
            round_time: Duration::from_secs(8),
            classifier: ClassifierConfig::lenient(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PoseRound {
    timer: RoundTimer,
    prompt: GestureLabel,
}

/// PoseMatch game
#[derive(Debug)]
pub struct PoseMatch {
    config: PoseMatchConfig,
    classifier: GestureClassifier,
    rng: StdRng,
    round: Option<PoseRound>,
    last_label: Option<GestureLabel>,
    matched: u64,
}

impl PoseMatch {
    pub fn new(config: PoseMatchConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: PoseMatchConfig, rng: StdRng) -> Self {
        PoseMatch {
            classifier: GestureClassifier::with_config(config.classifier.clone()),
            config,
            rng,
            round: None,
            last_label: None,
            matched: 0,
        }
    }

    pub fn prompt(&self) -> Option<GestureLabel> {
        self.round.map(|r| r.prompt)
    }

    pub fn last_label(&self) -> Option<GestureLabel> {
        self.last_label
    }

    /// Poses matched so far
    pub fn matched(&self) -> u64 {
        self.matched
    }

    fn new_round(&mut self, now: FrameTime) -> PoseRound {
        // the next prompt may repeat the previous one
        let prompt = *GestureLabel::PLAYABLE
            .choose(&mut self.rng)
            .unwrap_or(&GestureLabel::Open);
        debug!(%now, %prompt, "pose round started");
        PoseRound {
            timer: RoundTimer::start(now, self.config.round_time),
            prompt,
        }
    }

    fn render(&self, frame: &Frame, render: &mut RenderList) {
        if let Some(round) = &self.round {
            render.text(hud_line(0), format!("Show: {}", round.prompt), HUD_SIZE);
            render.text(
                hud_line(1),
                format!("Time: {}s", round.timer.remaining_secs_ceil(frame.timestamp)),
                HUD_SIZE,
            );
        }
        if let Some(label) = self.last_label {
            render.text(hud_line(2), format!("Seen: {}", label), HUD_SIZE);
        }
        if let Some(tip) = frame.fingertip() {
            render.cursor(tip);
        }
    }
}

impl GameMachine for PoseMatch {
    fn kind(&self) -> GameKind {
        GameKind::PoseMatch
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        let now = frame.timestamp;
        let mut events = Vec::new();
        let mut scored = false;

        match self.round {
            None => self.round = Some(self.new_round(now)),
            Some(round) if round.timer.expired(now) => {
                debug!(%now, prompt = %round.prompt, "pose round expired");
                events.push(GameEvent::RoundExpired);
                self.round = Some(self.new_round(now));
            }
            Some(round) => {
                if let Some(hand) = &frame.hand {
                    let label = self.classifier.classify(hand);
                    self.last_label = Some(label);
                    if label == round.prompt {
                        self.matched += 1;
                        scored = true;
                        debug!(%now, %label, "pose matched");
                        events.push(GameEvent::PoseMatched { label });
                        self.round = Some(self.new_round(now));
                    }
                }
            }
        }

        let mut render = RenderList::new();
        self.render(frame, &mut render);
        TickOutput::new(scored, render, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mano_core::{CanvasSize, Point2};
    use mano_gesture::reference_hand;

    fn canvas() -> CanvasSize {
        CanvasSize::new(640.0, 480.0)
    }

    fn empty(t: u64) -> Frame {
        Frame::empty(FrameTime::from_millis(t), canvas())
    }

    fn pose(t: u64, label: GestureLabel) -> Frame {
        let hand = reference_hand(label, Point2::new(0.5, 0.55), 0.2);
        Frame::with_hand(FrameTime::from_millis(t), canvas(), hand)
    }

    fn with_prompt(seed: u64, prompt: GestureLabel) -> PoseMatch {
        let mut game = PoseMatch::new(PoseMatchConfig::default(), seed);
        game.advance(&empty(0));
        if let Some(round) = game.round.as_mut() {
            round.prompt = prompt;
        }
        game
    }

    #[test]
    fn test_prompt_is_playable() {
        let mut game = PoseMatch::new(PoseMatchConfig::default(), 41);
        for i in 0..50u64 {
            game.advance(&empty(i * 5_001));
            assert!(game.prompt().unwrap().is_playable());
        }
    }

    #[test]
    fn test_matching_pose_scores_and_restarts() {
        let mut game = with_prompt(42, GestureLabel::ThumbsUp);

        let out = game.advance(&pose(100, GestureLabel::Fist));
        assert_eq!(out.score_delta, 0);
        assert_eq!(game.last_label(), Some(GestureLabel::Fist));

        let out = game.advance(&pose(200, GestureLabel::ThumbsUp));
        assert_eq!(out.score_delta, 1);
        assert_eq!(
            out.events,
            vec![GameEvent::PoseMatched {
                label: GestureLabel::ThumbsUp
            }]
        );
        assert_eq!(game.matched(), 1);
        assert_eq!(game.round.unwrap().timer.round_start(), FrameTime::from_millis(200));
    }

    #[test]
    fn test_unrecognized_pose_never_scores() {
        let mut game = with_prompt(43, GestureLabel::Open);
        for t in (100..4_900).step_by(100) {
            let out = game.advance(&pose(t, GestureLabel::None));
            assert_eq!(out.score_delta, 0);
        }
        assert_eq!(game.last_label(), Some(GestureLabel::None));
    }

    #[test]
    fn test_expiry_not_evaluated_on_same_tick() {
        let mut game = with_prompt(44, GestureLabel::Rock);

        let out = game.advance(&pose(5_001, GestureLabel::Rock));
        assert_eq!(out.events, vec![GameEvent::RoundExpired]);
        assert_eq!(out.score_delta, 0);
        assert_eq!(game.matched(), 0);
    }

    #[test]
    fn test_missing_hand_does_not_score() {
        let mut game = with_prompt(45, GestureLabel::Fist);
        for t in (100..4_900).step_by(100) {
            let out = game.advance(&empty(t));
            assert!(out.events.is_empty());
        }
        assert_eq!(game.prompt(), Some(GestureLabel::Fist));
    }
}
