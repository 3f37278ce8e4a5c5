//! MANO Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every minigame:
//! - Frame timestamps (FrameTime)
//! - Hand landmarks and per-tick frames
//! - Geometry kit (distances, hit tests, perimeter sampling)
//! - Declarative render commands
//! - Game events and game kinds
//! - Error types

pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod landmark;
pub mod render;
pub mod time;

pub use error::*;
pub use event::*;
pub use frame::*;
pub use geometry::*;
pub use landmark::*;
pub use render::*;
pub use time::*;
