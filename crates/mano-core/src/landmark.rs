//! Hand landmarks - the 21 normalized points produced per detected hand
//!
//! Coordinates are normalized to the canvas: `(0, 0)` is the top-left
//! corner, `(1, 1)` the bottom-right, y grows downwards.

use crate::{CanvasSize, ManoError, ManoResult, Point2};

/// Number of landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

/// Landmark identifier for the hand skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Landmarks forming the base of the palm
    pub fn palm_base() -> [HandLandmark; 5] {
        [
            HandLandmark::Wrist,
            HandLandmark::IndexMcp,
            HandLandmark::MiddleMcp,
            HandLandmark::RingMcp,
            HandLandmark::PinkyMcp,
        ]
    }
}

/// The four non-thumb fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn all() -> [Finger; 4] {
        [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky]
    }

    pub fn tip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexTip,
            Finger::Middle => HandLandmark::MiddleTip,
            Finger::Ring => HandLandmark::RingTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    pub fn base(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexMcp,
            Finger::Middle => HandLandmark::MiddleMcp,
            Finger::Ring => HandLandmark::RingMcp,
            Finger::Pinky => HandLandmark::PinkyMcp,
        }
    }
}

/// One hand's landmark set.
///
/// Construction guarantees exactly [`LANDMARK_COUNT`] finite points. Points
/// outside the normalized canvas are kept but reported as absent by
/// [`HandLandmarks::point`].
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Point2>,
}

impl HandLandmarks {
    /// Validate a raw detector landmark list
    pub fn new(points: Vec<Point2>) -> ManoResult<Self> {
        if points.len() < LANDMARK_COUNT {
            return Err(ManoError::MalformedLandmarks {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ManoError::NonFiniteLandmark { index });
        }

        let mut points = points;
        points.truncate(LANDMARK_COUNT);
        Ok(Self { points })
    }

    /// All 21 landmarks at one position
    pub fn uniform(point: Point2) -> Self {
        Self {
            points: vec![point; LANDMARK_COUNT],
        }
    }

    /// Normalized landmark position, `None` when it lies off-canvas
    pub fn point(&self, landmark: HandLandmark) -> Option<Point2> {
        let p = self.points[landmark.index()];
        if in_unit_range(p) {
            Some(p)
        } else {
            None
        }
    }

    /// Normalized landmark position without the range check
    pub fn raw(&self, landmark: HandLandmark) -> Point2 {
        self.points[landmark.index()]
    }

    /// Check every landmark lies on the normalized canvas
    pub fn validate_range(&self) -> ManoResult<()> {
        match self.points.iter().position(|p| !in_unit_range(*p)) {
            Some(index) => Err(ManoError::LandmarkOutOfRange { index }),
            None => Ok(()),
        }
    }

    /// Landmark position in canvas pixels
    pub fn pixel(&self, landmark: HandLandmark, canvas: CanvasSize) -> Option<Point2> {
        self.point(landmark).map(|p| canvas.to_pixels(p))
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

#[inline]
fn in_unit_range(p: Point2) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}
