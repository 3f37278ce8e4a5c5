//! MANO Test Harness - simulation and scenario testing
//!
//! This crate provides:
//! - Synthetic hands for every gesture, with optional jitter
//! - Scripted frame timelines (idle, poses, touches, drags, sweeps)
//! - A game simulator collecting scores and events
//! - Scripted frame source and detector for driving a full session
//! - Cross-variant scenarios

pub mod hands;
pub mod scenarios;
pub mod scripted;
pub mod simulator;
pub mod timeline;

pub use hands::*;
pub use scenarios::*;
pub use scripted::*;
pub use simulator::*;
pub use timeline::*;
