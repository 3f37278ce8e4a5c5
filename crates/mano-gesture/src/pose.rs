//! Reference poses - canonical landmark sets for each gesture label
//!
//! Layout is expressed in hand-scale units around a hand center, upright hand,
//! palm facing the camera. `scale` is the wrist to middle-finger-base length.

use mano_core::{Finger, GestureLabel, HandLandmark, HandLandmarks, Point2, LANDMARK_COUNT};

/// Thumb placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbPose {
    /// Pointing sideways, away from the palm
    Out,
    /// Pointing straight up
    Up,
    /// Tucked across the palm
    Tucked,
}

/// Per-finger layout of a hand pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseSpec {
    /// Index, middle, ring, pinky: extended?
    pub extended: [bool; 4],
    pub thumb: ThumbPose,
}

impl PoseSpec {
    pub fn for_label(label: GestureLabel) -> Self {
        let (extended, thumb) = match label {
            GestureLabel::Open => ([true, true, true, true], ThumbPose::Out),
            GestureLabel::TwoFingers => ([true, true, false, false], ThumbPose::Tucked),
            GestureLabel::Rock => ([true, false, false, true], ThumbPose::Tucked),
            GestureLabel::ThumbsUp => ([false, false, false, false], ThumbPose::Up),
            GestureLabel::Fist => ([false, false, false, false], ThumbPose::Tucked),
            // pointing with the index finger matches no rule
            GestureLabel::None => ([true, false, false, false], ThumbPose::Tucked),
        };
        PoseSpec { extended, thumb }
    }

    /// Landmark offsets in hand-scale units, relative to the hand center
    pub fn offsets(&self) -> [Point2; LANDMARK_COUNT] {
        let mut out = [Point2::zero(); LANDMARK_COUNT];

        out[HandLandmark::Wrist.index()] = Point2::new(0.0, 0.5);
        out[HandLandmark::ThumbCmc.index()] = Point2::new(-0.25, 0.35);
        out[HandLandmark::ThumbMcp.index()] = Point2::new(-0.4, 0.15);

        let (ip, tip) = match self.thumb {
            ThumbPose::Out => (Point2::new(-0.7, -0.2), Point2::new(-0.9, -0.3)),
            ThumbPose::Up => (Point2::new(-0.35, -0.55), Point2::new(-0.35, -0.9)),
            ThumbPose::Tucked => (Point2::new(-0.3, -0.15), Point2::new(-0.05, -0.2)),
        };
        out[HandLandmark::ThumbIp.index()] = ip;
        out[HandLandmark::ThumbTip.index()] = tip;

        for (finger, extended) in Finger::all().into_iter().zip(self.extended) {
            let base = match finger {
                Finger::Index => Point2::new(-0.25, -0.45),
                Finger::Middle => Point2::new(0.0, -0.5),
                Finger::Ring => Point2::new(0.2, -0.45),
                Finger::Pinky => Point2::new(0.4, -0.35),
            };
            let b = finger.base().index();
            out[b] = base;

            if extended {
                let tip = Point2::new(base.x * 1.1, -1.3);
                out[b + 1] = base.lerp(&tip, 1.0 / 3.0);
                out[b + 2] = base.lerp(&tip, 2.0 / 3.0);
                out[b + 3] = tip;
            } else {
                out[b + 1] = Point2::new(base.x, -0.75);
                out[b + 2] = Point2::new(base.x, -0.45);
                out[b + 3] = Point2::new(base.x, -0.1);
            }
        }

        out
    }

    /// Normalized landmark positions for a hand at `center` with size `scale`
    pub fn points(&self, center: Point2, scale: f32) -> Vec<Point2> {
        self.offsets()
            .iter()
            .map(|o| Point2::new(center.x + o.x * scale, center.y + o.y * scale))
            .collect()
    }
}

/// Canonical hand for a gesture label
pub fn reference_hand(label: GestureLabel, center: Point2, scale: f32) -> HandLandmarks {
    let points = PoseSpec::for_label(label).points(center, scale);
    // 21 points by construction; only a non-finite center can fail
    HandLandmarks::new(points).unwrap_or_else(|_| HandLandmarks::uniform(center))
}
