//! Synthetic hands
//!
//! Builds landmark sets for a gesture at a chosen place and size, optionally
//! perturbed by per-landmark jitter to mimic detector noise.

use mano_core::{CanvasSize, GestureLabel, HandLandmark, HandLandmarks, Point2};
use mano_gesture::PoseSpec;
use rand::rngs::StdRng;
use rand::Rng;

/// Default palm position (normalized)
pub const DEFAULT_CENTER: Point2 = Point2 { x: 0.5, y: 0.55 };
/// Default wrist to middle-finger-base distance (normalized)
pub const DEFAULT_SCALE: f32 = 0.2;

/// Builder for a synthetic hand
#[derive(Clone, Debug)]
pub struct SyntheticHand {
    pub label: GestureLabel,
    /// Palm position, normalized
    pub center: Point2,
    /// Hand scale, normalized
    pub scale: f32,
    /// Maximum per-coordinate noise, as a fraction of the hand scale
    pub jitter: f32,
}

impl SyntheticHand {
    pub fn new(label: GestureLabel) -> Self {
        SyntheticHand {
            label,
            center: DEFAULT_CENTER,
            scale: DEFAULT_SCALE,
            jitter: 0.0,
        }
    }

    /// Index-finger pointing hand, the pose used for touch games
    pub fn pointing() -> Self {
        Self::new(GestureLabel::None)
    }

    pub fn at(mut self, center: Point2) -> Self {
        self.center = center;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    /// Raw points, jittered with `rng`
    pub fn points(&self, rng: &mut StdRng) -> Vec<Point2> {
        let mut points = PoseSpec::for_label(self.label).points(self.center, self.scale);
        if self.jitter > 0.0 {
            let amplitude = self.jitter * self.scale;
            for p in points.iter_mut() {
                p.x += rng.gen_range(-amplitude..=amplitude);
                p.y += rng.gen_range(-amplitude..=amplitude);
            }
        }
        points
    }

    /// Landmark set, jittered with `rng`
    pub fn build(&self, rng: &mut StdRng) -> HandLandmarks {
        let points = self.points(rng);
        HandLandmarks::new(points).unwrap_or_else(|_| HandLandmarks::uniform(self.center))
    }

    /// Landmark set with the index fingertip exactly at `pixel`
    pub fn touching(&self, pixel: Point2, canvas: CanvasSize) -> HandLandmarks {
        let target = canvas.to_normalized(pixel);
        let base = PoseSpec::for_label(self.label).points(self.center, self.scale);
        let tip = base[HandLandmark::IndexTip.index()];
        let (dx, dy) = (target.x - tip.x, target.y - tip.y);

        let mut points: Vec<Point2> = base.iter().map(|p| p.offset(dx, dy)).collect();
        // keep the tip exact; the offset can lose precision
        points[HandLandmark::IndexTip.index()] = target;
        HandLandmarks::new(points).unwrap_or_else(|_| HandLandmarks::uniform(target))
    }
}

/// Pointing hand whose index tip is at `pixel`
pub fn touch_hand(pixel: Point2, canvas: CanvasSize) -> HandLandmarks {
    SyntheticHand::pointing().touching(pixel, canvas)
}

/// Clean hand for `label` at the default position
pub fn pose_hand(label: GestureLabel) -> HandLandmarks {
    mano_gesture::reference_hand(label, DEFAULT_CENTER, DEFAULT_SCALE)
}
