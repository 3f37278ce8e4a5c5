//! MANO Runtime - frame driver and session control
//!
//! Each tick of a [`GameSession`]:
//! 1. Pull the next video frame from the [`FrameSource`]
//! 2. Await one detection from the [`HandDetector`] (single in-flight)
//! 3. Build the immutable [`Frame`](mano_core::Frame)
//! 4. Advance the active game
//! 5. Forward the score delta and render commands to the sinks
//!
//! Cancellation through a [`SessionHandle`] stops the loop between or during
//! awaits; an in-flight detection is discarded and the game is not advanced.

pub mod config;
pub mod detector;
pub mod session;
pub mod sink;
pub mod stats;
pub mod telemetry;

pub use config::*;
pub use detector::*;
pub use session::*;
pub use sink::*;
pub use stats::*;
