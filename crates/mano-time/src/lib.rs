//! MANO Time - timing state machines shared by every game
//!
//! - RoundTimer: round start, elapsed / remaining, expiry
//! - Cadence: fixed-period spawn schedule
//! - PendingTransition: one-shot deferred transition (feedback / debounce)
//! - FrameClock: monotonic session clock stamping frames
//!
//! All of them are driven by frame timestamps, never by frame counts.

pub mod cadence;
pub mod clock;
pub mod pending;
pub mod timer;

pub use cadence::*;
pub use clock::*;
pub use pending::*;
pub use timer::*;
