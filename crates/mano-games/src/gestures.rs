//! SequenceRecallGestures - perform a short gesture sequence in time
//!
//! Every round draws a fresh random sequence of playable gestures. The
//! classified gesture of each tick is compared with the element under the
//! cursor; a match advances the cursor, and reaching the end scores and
//! starts the next round. An expired round is replaced without penalty.

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

/// SequenceRecallGestures configuration
#[derive(Debug, Clone)]
pub struct GestureSequenceConfig {
    pub round_time: Duration,
    pub sequence_length: usize,
    pub classifier: ClassifierConfig,
}

impl Default for GestureSequenceConfig {
    fn default() -> Self {
        GestureSequenceConfig {
            round_time: Duration::from_secs(8),
            sequence_length: 2,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl GestureSequenceConfig {
    /// More time, looser classification
    pub fn relaxed() -> Self {
        GestureSequenceConfig {
            round_time: Duration::from_secs(12),
            sequence_length: 2,
            classifier: ClassifierConfig::lenient(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GestureRound {
    timer: RoundTimer,
    sequence: Vec<GestureLabel>,
    cursor: usize,
}

/// SequenceRecallGestures game
#[derive(Debug)]
pub struct SequenceRecallGestures {
    config: GestureSequenceConfig,
    classifier: GestureClassifier,
    rng: StdRng,
    round: Option<GestureRound>,
    /// Label classified on the last tick with a hand
    last_label: Option<GestureLabel>,
}

impl SequenceRecallGestures {
    pub fn new(config: GestureSequenceConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GestureSequenceConfig, rng: StdRng) -> Self {
        SequenceRecallGestures {
            classifier: GestureClassifier::with_config(config.classifier.clone()),
            config,
            rng,
            round: None,
            last_label: None,
        }
    }

    /// Current sequence, empty before the first tick
    pub fn sequence(&self) -> &[GestureLabel] {
        self.round.as_ref().map(|r| r.sequence.as_slice()).unwrap_or_default()
    }

    pub fn cursor(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.cursor)
    }

    /// Gesture the player should perform next
    pub fn expected(&self) -> Option<GestureLabel> {
        let round = self.round.as_ref()?;
        round.sequence.get(round.cursor).copied()
    }

    pub fn last_label(&self) -> Option<GestureLabel> {
        self.last_label
    }

    fn new_round(&mut self, now: FrameTime) -> GestureRound {
        let sequence: Vec<GestureLabel> = (0..self.config.sequence_length)
            .filter_map(|_| GestureLabel::PLAYABLE.choose(&mut self.rng).copied())
            .collect();
        debug!(%now, ?sequence, "gesture round started");
        GestureRound {
            timer: RoundTimer::start(now, self.config.round_time),
            sequence,
            cursor: 0,
        }
    }

    fn render(&self, frame: &Frame, render: &mut RenderList) {
        let now = frame.timestamp;
        if let Some(round) = &self.round {
            let steps: Vec<String> = round
                .sequence
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    if i < round.cursor {
                        format!("[{}]", label)
                    } else {
                        label.to_string()
                    }
                })
                .collect();
            render.text(hud_line(0), format!("Do: {}", steps.join(" -> ")), HUD_SIZE);
            render.text(
                hud_line(1),
                format!("Time: {}s", round.timer.remaining_secs_ceil(now)),
                HUD_SIZE,
            );
        }
        let seen = self.last_label.unwrap_or(GestureLabel::None);
        render.text(hud_line(2), format!("Seen: {}", seen), HUD_SIZE);

        if let Some(tip) = frame.fingertip() {
            render.cursor(tip);
        }
    }
}

impl GameMachine for SequenceRecallGestures {
    fn kind(&self) -> GameKind {
        GameKind::SequenceRecallGestures
    }

    fn advance(&mut self, frame: &Frame) -> TickOutput {
        let now = frame.timestamp;
        let mut events = Vec::new();
        let mut scored = false;

        let expired = self.round.as_ref().map(|r| r.timer.expired(now));
        match expired {
            None => self.round = Some(self.new_round(now)),
            Some(true) => {
                debug!(%now, "gesture round expired");
                events.push(GameEvent::RoundExpired);
                self.round = Some(self.new_round(now));
            }
            Some(false) => {
                if let Some(hand) = &frame.hand {
                    let label = self.classifier.classify(hand);
                    self.last_label = Some(label);

                    let completed = match self.round.as_mut() {
                        Some(round) if round.sequence.get(round.cursor) == Some(&label) => {
                            round.cursor += 1;
                            events.push(GameEvent::StepMatched {
                                cursor: round.cursor,
                            });
                            (round.cursor == round.sequence.len()).then_some(round.sequence.len())
                        }
                        _ => None,
                    };

                    if let Some(length) = completed {
                        debug!(%now, length, "gesture sequence completed");
                        events.push(GameEvent::SequenceCompleted { length });
                        scored = true;
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

    fn set_sequence(game: &mut SequenceRecallGestures, sequence: Vec<GestureLabel>) {
        if let Some(round) = game.round.as_mut() {
            round.sequence = sequence;
            round.cursor = 0;
        }
    }

    #[test]
    fn test_first_tick_starts_round() {
        let mut game = SequenceRecallGestures::new(GestureSequenceConfig::default(), 11);
        assert!(game.sequence().is_empty());

        game.advance(&empty(0));
        assert_eq!(game.sequence().len(), 2);
        assert!(game.sequence().iter().all(|l| l.is_playable()));
        assert_eq!(game.cursor(), 0);
    }

    #[test]
    fn test_sequence_in_order_scores() {
        let mut game = SequenceRecallGestures::new(GestureSequenceConfig::default(), 12);
        game.advance(&empty(0));
        set_sequence(&mut game, vec![GestureLabel::Fist, GestureLabel::Open]);

        let out = game.advance(&pose(100, GestureLabel::Fist));
        assert_eq!(out.events, vec![GameEvent::StepMatched { cursor: 1 }]);
        assert_eq!(out.score_delta, 0);

        let out = game.advance(&pose(200, GestureLabel::Open));
        assert_eq!(out.score_delta, 1);
        assert!(out.events.contains(&GameEvent::SequenceCompleted { length: 2 }));
        assert_eq!(game.cursor(), 0);
        assert_eq!(game.sequence().len(), 2);
    }

    #[test]
    fn test_wrong_gesture_keeps_cursor() {
        let mut game = SequenceRecallGestures::new(GestureSequenceConfig::default(), 13);
        game.advance(&empty(0));
        set_sequence(&mut game, vec![GestureLabel::Rock, GestureLabel::ThumbsUp]);

        let out = game.advance(&pose(100, GestureLabel::Open));
        assert!(out.events.is_empty());
        assert_eq!(game.cursor(), 0);
        assert_eq!(game.last_label(), Some(GestureLabel::Open));

        // order matters
        game.advance(&pose(150, GestureLabel::ThumbsUp));
        assert_eq!(game.cursor(), 0);
        game.advance(&pose(200, GestureLabel::Rock));
        assert_eq!(game.cursor(), 1);
    }

    #[test]
    fn test_expiry_starts_fresh_round_without_scoring() {
        let mut game = SequenceRecallGestures::new(GestureSequenceConfig::default(), 14);
        game.advance(&empty(0));
        set_sequence(&mut game, vec![GestureLabel::Fist, GestureLabel::Fist]);
        game.advance(&pose(100, GestureLabel::Fist));
        assert_eq!(game.cursor(), 1);

        let out = game.advance(&empty(8_000));
        assert!(out.events.is_empty());

        // expiry is processed on hand-less ticks and the tick is not evaluated
        let out = game.advance(&pose(8_001, GestureLabel::Fist));
        assert_eq!(out.events, vec![GameEvent::RoundExpired]);
        assert_eq!(out.score_delta, 0);
        assert_eq!(game.cursor(), 0);
    }

    #[test]
    fn test_missing_hand_keeps_progress() {
        let mut game = SequenceRecallGestures::new(GestureSequenceConfig::default(), 15);
        game.advance(&empty(0));
        set_sequence(&mut game, vec![GestureLabel::TwoFingers, GestureLabel::Open]);
        game.advance(&pose(100, GestureLabel::TwoFingers));

        for t in (200..7_000).step_by(100) {
            let out = game.advance(&empty(t));
            assert_eq!(out.score_delta, 0);
        }
        assert_eq!(game.cursor(), 1);
        assert_eq!(game.expected(), Some(GestureLabel::Open));
    }
}
