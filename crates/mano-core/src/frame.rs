//! Frame - the immutable per-tick input to every game

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FrameTime, HandLandmark, HandLandmarks, Point2};

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Normalized point to pixels
    pub fn to_pixels(&self, p: Point2) -> Point2 {
        Point2::new(p.x * self.width, p.y * self.height)
    }

    /// Pixel point to normalized coordinates
    pub fn to_normalized(&self, p: Point2) -> Point2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Point2::zero();
        }
        Point2::new(p.x / self.width, p.y / self.height)
    }

    pub fn center(&self) -> Point2 {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}

/// One tick of input.
///
/// Only the first valid detected hand is tracked; malformed hands are dropped
/// at construction so games never see them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Tick timestamp
    pub timestamp: FrameTime,
    /// Tracked hand (if detected)
    pub hand: Option<HandLandmarks>,
    /// Canvas size
    pub canvas: CanvasSize,
}

impl Frame {
    /// Frame with no hand detected
    pub fn empty(timestamp: FrameTime, canvas: CanvasSize) -> Self {
        Self {
            timestamp,
            hand: None,
            canvas,
        }
    }

    pub fn with_hand(timestamp: FrameTime, canvas: CanvasSize, hand: HandLandmarks) -> Self {
        Self {
            timestamp,
            hand: Some(hand),
            canvas,
        }
    }

    /// Build a frame from raw detector output: a list of hands, each a list
    /// of normalized points
    pub fn from_detection(
        timestamp: FrameTime,
        canvas: CanvasSize,
        hands: Vec<Vec<Point2>>,
    ) -> Self {
        let mut tracked = None;
        for raw in hands {
            match HandLandmarks::new(raw) {
                Ok(hand) => {
                    tracked = Some(hand);
                    break;
                }
                Err(e) => debug!(%timestamp, error = %e, "dropping malformed hand"),
            }
        }

        Self {
            timestamp,
            hand: tracked,
            canvas,
        }
    }

    pub fn has_hand(&self) -> bool {
        self.hand.is_some()
    }

    /// Pointing fingertip (index tip) in canvas pixels
    pub fn fingertip(&self) -> Option<Point2> {
        self.landmark_pixel(HandLandmark::IndexTip)
    }

    pub fn landmark_pixel(&self, landmark: HandLandmark) -> Option<Point2> {
        self.hand
            .as_ref()
            .and_then(|hand| hand.pixel(landmark, self.canvas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detection_picks_first_valid_hand() {
        let canvas = CanvasSize::new(100.0, 100.0);
        let hands = vec![
            vec![Point2::new(0.1, 0.1); 5],
            vec![Point2::new(0.3, 0.4); 21],
            vec![Point2::new(0.9, 0.9); 21],
        ];
        let frame = Frame::from_detection(FrameTime::from_millis(5), canvas, hands);

        let tip = frame.fingertip().unwrap();
        assert!((tip.x - 30.0).abs() < 1e-4);
        assert!((tip.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_detection_all_malformed() {
        let frame = Frame::from_detection(
            FrameTime::ZERO,
            CanvasSize::default(),
            vec![vec![Point2::new(0.5, 0.5); 2]],
        );
        assert!(!frame.has_hand());
        assert!(frame.fingertip().is_none());
    }

    #[test]
    fn test_canvas_roundtrip() {
        let canvas = CanvasSize::new(640.0, 480.0);
        let p = Point2::new(320.0, 120.0);
        let back = canvas.to_pixels(canvas.to_normalized(p));
        assert!((back.x - p.x).abs() < 1e-3);
        assert!((back.y - p.y).abs() < 1e-3);
    }
}
