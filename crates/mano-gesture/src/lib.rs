//! MANO Gesture - hand pose classification
//!
//! Maps one hand's 21 landmarks to a discrete [`GestureLabel`]:
//! - Palm reference and hand-size-relative thresholds
//! - Finger extension / fold analysis
//! - Ordered rule evaluation (first match wins)
//!
//! Also provides canonical landmark sets for every label, used to calibrate
//! thresholds and to drive simulations.

pub mod classifier;
pub mod pose;

pub use classifier::*;
pub use mano_core::GestureLabel;
pub use pose::*;
