//! MANO Games - per-frame game state engine
//!
//! Six minigames share one execution contract: once per tick the driver
//! hands the current [`Frame`](mano_core::Frame) to [`Game::advance`], which
//! updates the round state and returns a [`TickOutput`]:
//! - a score delta (0 or 1) for the external score sink
//! - declarative render commands
//! - the discrete game events of the tick
//!
//! # Games
//!
//! - ReactionTarget: touch targets spawned on a fixed cadence
//! - ShapeTrace: trace a circle or square through its checkpoints
//! - SequenceRecallBalls: repeat a growing sequence of flashed balls
//! - SequenceRecallGestures: perform a short sequence of hand gestures
//! - DirectionalSwipe: swipe in the prompted direction
//! - PoseMatch: hold the prompted hand pose

pub mod balls;
pub mod gestures;
pub mod machine;
pub mod pose_match;
pub mod reaction;
pub mod swipe;
pub mod trace;

pub use balls::*;
pub use gestures::*;
pub use machine::*;
pub use pose_match::*;
pub use reaction::*;
pub use swipe::*;
pub use trace::*;
