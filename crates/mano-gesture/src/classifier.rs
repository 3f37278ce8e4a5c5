//! Gesture classifier - landmark geometry to gesture label
//!
//! All thresholds are multiples of the hand's own scale (wrist to middle-finger
//! base), so classification does not depend on the distance to the camera.

use mano_core::{distance, Finger, GestureLabel, HandLandmark, HandLandmarks, Point2};
use tracing::trace;

/// Classifier thresholds, expressed in hand-scale units
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Tip must rise above the palm center by more than this to be extended
    pub extend_ratio: f32,
    /// Tip rising less than this above the palm center counts as folded
    pub fold_ratio: f32,
    /// Horizontal thumb-tip offset from the palm center for an open hand
    pub thumb_lateral_ratio: f32,
    /// Thumb tip must rise above its IP joint by more than this for thumbs-up
    pub thumbs_up_ratio: f32,
    /// Maximum thumb-tip distance to the palm center for a fist
    pub fist_thumb_ratio: f32,
    /// Hands smaller than this (normalized units) are not classified
    pub min_hand_scale: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            extend_ratio: 0.5,
            fold_ratio: 0.15,
            thumb_lateral_ratio: 0.5,
            thumbs_up_ratio: 0.25,
            fist_thumb_ratio: 0.8,
            min_hand_scale: 0.01,
        }
    }
}

impl ClassifierConfig {
    /// Looser thresholds for low-quality detections
    pub fn lenient() -> Self {
        ClassifierConfig {
            extend_ratio: 0.4,
            fold_ratio: 0.25,
            thumb_lateral_ratio: 0.4,
            thumbs_up_ratio: 0.2,
            fist_thumb_ratio: 1.0,
            min_hand_scale: 0.01,
        }
    }
}

/// Vertical state of a single finger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerState {
    Extended,
    Folded,
    /// Neither clearly extended nor clearly folded
    Partial,
}

/// Measurements a classification is derived from
#[derive(Debug, Clone, PartialEq)]
pub struct HandAnalysis {
    /// Average of the palm-base landmarks
    pub palm_center: Point2,
    /// Wrist to middle-finger base
    pub hand_scale: f32,
    /// Index, middle, ring, pinky
    pub fingers: [FingerState; 4],
    /// Horizontal thumb-tip offset from the palm center, in hand scales
    pub thumb_lateral: f32,
    /// Thumb-tip height above its IP joint, in hand scales
    pub thumb_rise: f32,
    /// Thumb-tip distance to the palm center, in hand scales
    pub thumb_to_palm: f32,
}

impl HandAnalysis {
    pub fn finger(&self, finger: Finger) -> FingerState {
        self.fingers[finger as usize]
    }

    fn extended(&self, finger: Finger) -> bool {
        self.finger(finger) == FingerState::Extended
    }

    fn folded(&self, finger: Finger) -> bool {
        self.finger(finger) == FingerState::Folded
    }

    fn all_folded(&self) -> bool {
        self.fingers.iter().all(|f| *f == FingerState::Folded)
    }
}

/// Stateless gesture classifier
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Measure the hand. `None` when a required landmark is off-canvas or the
    /// hand is degenerate.
    pub fn analyze(&self, hand: &HandLandmarks) -> Option<HandAnalysis> {
        let cfg = &self.config;

        let mut sum = Point2::zero();
        for landmark in HandLandmark::palm_base() {
            let p = hand.point(landmark)?;
            sum.x += p.x;
            sum.y += p.y;
        }
        let palm_center = Point2::new(sum.x / 5.0, sum.y / 5.0);

        let wrist = hand.point(HandLandmark::Wrist)?;
        let middle_base = hand.point(HandLandmark::MiddleMcp)?;
        let hand_scale = distance(wrist, middle_base);
        if hand_scale < cfg.min_hand_scale {
            return None;
        }

        let mut fingers = [FingerState::Partial; 4];
        for (slot, finger) in fingers.iter_mut().zip(Finger::all()) {
            let tip = hand.point(finger.tip())?;
            let rise = (palm_center.y - tip.y) / hand_scale;
            *slot = if rise > cfg.extend_ratio {
                FingerState::Extended
            } else if rise < cfg.fold_ratio {
                FingerState::Folded
            } else {
                FingerState::Partial
            };
        }

        let thumb_tip = hand.point(HandLandmark::ThumbTip)?;
        let thumb_ip = hand.point(HandLandmark::ThumbIp)?;

        Some(HandAnalysis {
            palm_center,
            hand_scale,
            fingers,
            thumb_lateral: (thumb_tip.x - palm_center.x).abs() / hand_scale,
            thumb_rise: (thumb_ip.y - thumb_tip.y) / hand_scale,
            thumb_to_palm: distance(thumb_tip, palm_center) / hand_scale,
        })
    }

    /// Classify a hand. Rules are evaluated in priority order; the first
    /// match wins.
    pub fn classify(&self, hand: &HandLandmarks) -> GestureLabel {
        match self.analyze(hand) {
            Some(analysis) => {
                let label = self.classify_analysis(&analysis);
                trace!(?label, fingers = ?analysis.fingers, "classified hand");
                label
            }
            None => GestureLabel::None,
        }
    }

    /// Apply the rule table to precomputed measurements
    pub fn classify_analysis(&self, a: &HandAnalysis) -> GestureLabel {
        use Finger::*;
        let cfg = &self.config;

        if a.extended(Index)
            && a.extended(Middle)
            && a.extended(Ring)
            && a.extended(Pinky)
            && a.thumb_lateral > cfg.thumb_lateral_ratio
        {
            return GestureLabel::Open;
        }

        if a.extended(Index) && a.extended(Middle) && a.folded(Ring) && a.folded(Pinky) {
            return GestureLabel::TwoFingers;
        }

        if a.extended(Index) && a.extended(Pinky) && a.folded(Middle) && a.folded(Ring) {
            return GestureLabel::Rock;
        }

        if a.thumb_rise > cfg.thumbs_up_ratio && a.all_folded() {
            return GestureLabel::ThumbsUp;
        }

        if a.all_folded() && a.thumb_to_palm < cfg.fist_thumb_ratio {
            return GestureLabel::Fist;
        }

        GestureLabel::None
    }
}

/// Classify with default thresholds
pub fn classify(hand: &HandLandmarks) -> GestureLabel {
    GestureClassifier::new().classify(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::reference_hand;
    use proptest::prelude::*;

    fn center() -> Point2 {
        Point2::new(0.5, 0.55)
    }

    #[test]
    fn test_reference_poses_classify() {
        let classifier = GestureClassifier::new();
        for label in [
            GestureLabel::Open,
            GestureLabel::TwoFingers,
            GestureLabel::Rock,
            GestureLabel::ThumbsUp,
            GestureLabel::Fist,
            GestureLabel::None,
        ] {
            let hand = reference_hand(label, center(), 0.2);
            assert_eq!(classifier.classify(&hand), label, "pose {:?}", label);
        }
    }

    #[test]
    fn test_open_requires_thumb_out() {
        // all fingers up but thumb tucked: not open
        let mut points = reference_hand(GestureLabel::Open, center(), 0.2)
            .points()
            .to_vec();
        let fist = reference_hand(GestureLabel::Fist, center(), 0.2);
        points[HandLandmark::ThumbTip.index()] = fist.raw(HandLandmark::ThumbTip);
        points[HandLandmark::ThumbIp.index()] = fist.raw(HandLandmark::ThumbIp);
        let hand = HandLandmarks::new(points).unwrap();

        assert_eq!(classify(&hand), GestureLabel::None);
    }

    #[test]
    fn test_analysis_scale() {
        let hand = reference_hand(GestureLabel::Fist, center(), 0.2);
        let analysis = GestureClassifier::new().analyze(&hand).unwrap();

        assert!((analysis.hand_scale - 0.2).abs() < 1e-4);
        assert!(analysis.fingers.iter().all(|f| *f == FingerState::Folded));
    }

    #[test]
    fn test_off_canvas_landmark_is_none() {
        let mut points = reference_hand(GestureLabel::Fist, center(), 0.2)
            .points()
            .to_vec();
        points[HandLandmark::MiddleTip.index()] = Point2::new(0.5, -0.2);
        let hand = HandLandmarks::new(points).unwrap();

        assert_eq!(classify(&hand), GestureLabel::None);
    }

    #[test]
    fn test_degenerate_hand_is_none() {
        let hand = HandLandmarks::uniform(Point2::new(0.5, 0.5));
        assert_eq!(classify(&hand), GestureLabel::None);
    }

    #[test]
    fn test_partial_finger_blocks_fist() {
        let classifier = GestureClassifier::new();
        let mut analysis = classifier
            .analyze(&reference_hand(GestureLabel::Fist, center(), 0.2))
            .unwrap();
        analysis.fingers[Finger::Ring as usize] = FingerState::Partial;

        assert_eq!(classifier.classify_analysis(&analysis), GestureLabel::None);
    }

    proptest! {
        #[test]
        fn prop_classification_is_scale_and_position_invariant(
            cx in 0.35f32..0.65,
            cy in 0.35f32..0.65,
            scale in 0.08f32..0.25,
            pick in 0usize..6,
        ) {
            let labels = [
                GestureLabel::Open,
                GestureLabel::TwoFingers,
                GestureLabel::Rock,
                GestureLabel::ThumbsUp,
                GestureLabel::Fist,
                GestureLabel::None,
            ];
            let label = labels[pick];
            let hand = reference_hand(label, Point2::new(cx, cy), scale);
            let classifier = GestureClassifier::new();

            let first = classifier.classify(&hand);
            prop_assert_eq!(first, label);
            prop_assert_eq!(classifier.classify(&hand), first);
        }
    }
}
