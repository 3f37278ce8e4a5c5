//! Game events, gesture labels and game kinds
//!
//! Events are the discrete outcomes a game reports for a tick. They are
//! informational; the only scoring channel is the tick's score delta.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Discrete named hand pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    Open,
    TwoFingers,
    Rock,
    ThumbsUp,
    Fist,
    None,
}

impl GestureLabel {
    /// Labels a game may prompt for (everything except `None`)
    pub const PLAYABLE: [GestureLabel; 5] = [
        GestureLabel::Open,
        GestureLabel::TwoFingers,
        GestureLabel::Rock,
        GestureLabel::ThumbsUp,
        GestureLabel::Fist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Open => "open",
            GestureLabel::TwoFingers => "two-fingers",
            GestureLabel::Rock => "rock",
            GestureLabel::ThumbsUp => "thumbs-up",
            GestureLabel::Fist => "fist",
            GestureLabel::None => "none",
        }
    }

    pub fn is_playable(&self) -> bool {
        *self != GestureLabel::None
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swipe direction on the canvas (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub const ALL: [SwipeDirection; 4] = [
        SwipeDirection::Left,
        SwipeDirection::Right,
        SwipeDirection::Up,
        SwipeDirection::Down,
    ];

    /// Dominant-axis direction of a displacement
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if dy > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six minigames. Serialized labels are the `gameType` values accepted by
/// the score persistence API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    ReactionTarget,
    ShapeTrace,
    SequenceRecallBalls,
    SequenceRecallGestures,
    DirectionalSwipe,
    PoseMatch,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::ReactionTarget,
        GameKind::ShapeTrace,
        GameKind::SequenceRecallBalls,
        GameKind::SequenceRecallGestures,
        GameKind::DirectionalSwipe,
        GameKind::PoseMatch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GameKind::ReactionTarget => "ReactionTarget",
            GameKind::ShapeTrace => "ShapeTrace",
            GameKind::SequenceRecallBalls => "SequenceRecallBalls",
            GameKind::SequenceRecallGestures => "SequenceRecallGestures",
            GameKind::DirectionalSwipe => "DirectionalSwipe",
            GameKind::PoseMatch => "PoseMatch",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.label() == label)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete outcome reported by a game during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A reaction target appeared
    TargetSpawned { index: u64 },
    /// A reaction target was touched
    TargetHit { reaction: Duration },
    /// An untouched target was replaced
    TargetMissed,
    /// A new shape was laid out
    ShapeStarted { kind: crate::ShapeKind },
    /// The fingertip reached the outline for the first time
    TracingStarted,
    /// A checkpoint joined the hit-set
    CheckpointHit { index: usize },
    /// Enough checkpoints were hit
    ShapeCompleted,
    /// A sequence element was matched
    StepMatched { cursor: usize },
    /// A whole sequence was matched
    SequenceCompleted { length: usize },
    /// A ball was touched during input
    BallTouched { index: usize, correct: bool },
    /// Balls were laid out again
    LayoutReset,
    /// A swipe passed the distance threshold
    SwipeDetected {
        direction: SwipeDirection,
        matched: bool,
    },
    /// The prompted pose was held
    PoseMatched { label: GestureLabel },
    /// The round timer ran out
    RoundExpired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_direction_from_delta() {
        assert_eq!(SwipeDirection::from_delta(100.0, 10.0), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_delta(10.0, 100.0), SwipeDirection::Down);
        assert_eq!(SwipeDirection::from_delta(-90.0, 20.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_delta(5.0, -90.0), SwipeDirection::Up);
        // ties go vertical
        assert_eq!(SwipeDirection::from_delta(50.0, 50.0), SwipeDirection::Down);
    }

    #[test]
    fn test_game_kind_labels_roundtrip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(GameKind::from_label("Tetris"), None);
    }

    #[test]
    fn test_game_kind_serializes_as_label() {
        let json = serde_json::to_string(&GameKind::SequenceRecallBalls).unwrap();
        assert_eq!(json, "\"SequenceRecallBalls\"");
    }

    #[test]
    fn test_playable_excludes_none() {
        assert!(!GestureLabel::PLAYABLE.contains(&GestureLabel::None));
        assert!(GestureLabel::PLAYABLE.iter().all(|l| l.is_playable()));
    }
}
