//! Detector and frame source boundaries
//!
//! Both are external collaborators. The session awaits them one call at a
//! time and never retries a failed detection.

use mano_core::{CanvasSize, FrameTime, ManoResult, Point2};

/// Raw detector output for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Every detected hand as a list of normalized points
    pub hands: Vec<Vec<Point2>>,
}

impl Detection {
    pub fn new(hands: Vec<Vec<Point2>>) -> Self {
        Self { hands }
    }

    /// A detection with one hand
    pub fn single(points: Vec<Point2>) -> Self {
        Self {
            hands: vec![points],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

/// Hand landmark detector.
///
/// `Ok(None)` and an empty detection both mean "no hand". Errors for which
/// [`ManoError::is_fatal`](mano_core::ManoError::is_fatal) holds stop the
/// session; any other error is logged and the tick runs without a hand.
#[allow(async_fn_in_trait)]
pub trait HandDetector {
    /// Video frame type
    type Input;

    async fn detect(
        &mut self,
        input: &Self::Input,
        timestamp: FrameTime,
    ) -> ManoResult<Option<Detection>>;
}

/// One frame from a video source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFrame<I> {
    pub input: I,
    /// Capture time; stamped by the session clock when absent
    pub timestamp: Option<FrameTime>,
    pub canvas: CanvasSize,
}

impl<I> SourceFrame<I> {
    pub fn new(input: I, canvas: CanvasSize) -> Self {
        Self {
            input,
            timestamp: None,
            canvas,
        }
    }

    pub fn at(input: I, timestamp: FrameTime, canvas: CanvasSize) -> Self {
        Self {
            input,
            timestamp: Some(timestamp),
            canvas,
        }
    }
}

/// Producer of video frames, one per tick. `None` ends the session.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    type Input;

    async fn next_frame(&mut self) -> Option<SourceFrame<Self::Input>>;
}
