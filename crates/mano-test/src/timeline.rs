//! Scripted frame timelines
//!
//! A timeline is a list of timestamped cues built step by step. Every step
//! advances the script clock; `frames()` turns the cues into game frames and
//! `detections()` into raw detector answers.

use std::time::Duration;

use mano_core::{CanvasSize, Frame, FrameTime, GestureLabel, HandLandmarks, Point2};
use mano_runtime::Detection;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::hands::SyntheticHand;

/// What the camera sees at one instant
#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    NoHand,
    /// Hand in a gesture at the default position
    Pose(GestureLabel),
    /// Pointing hand with its fingertip on a pixel
    Touch(Point2),
    /// Explicit landmark set
    Hand(HandLandmarks),
    /// Unvalidated detector output, possibly malformed
    Raw(Vec<Vec<Point2>>),
}

/// Timestamped cue list
#[derive(Clone, Debug)]
pub struct Timeline {
    canvas: CanvasSize,
    step: Duration,
    now: FrameTime,
    cues: Vec<(FrameTime, Cue)>,
    jitter: f32,
    seed: u64,
}

impl Timeline {
    /// Empty timeline sampling every `step`
    pub fn new(canvas: CanvasSize, step: Duration) -> Self {
        Timeline {
            canvas,
            step,
            now: FrameTime::ZERO,
            cues: Vec::new(),
            jitter: 0.0,
            seed: 0,
        }
    }

    /// 640x480 at ~30 fps
    pub fn standard() -> Self {
        Self::new(CanvasSize::default(), Duration::from_millis(33))
    }

    /// Landmark noise for pose cues
    pub fn with_jitter(mut self, jitter: f32, seed: u64) -> Self {
        self.jitter = jitter;
        self.seed = seed;
        self
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Script clock: timestamp of the next cue
    pub fn now(&self) -> FrameTime {
        self.now
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cues(&self) -> &[(FrameTime, Cue)] {
        &self.cues
    }

    /// One cue at the current time, then one step forward
    pub fn cue(mut self, cue: Cue) -> Self {
        self.cues.push((self.now, cue));
        self.now = self.now + self.step;
        self
    }

    /// Repeat `cue` for `duration`
    pub fn hold(mut self, cue: Cue, duration: Duration) -> Self {
        let end = self.now + duration;
        while self.now < end {
            self = self.cue(cue.clone());
        }
        self
    }

    pub fn idle(self, duration: Duration) -> Self {
        self.hold(Cue::NoHand, duration)
    }

    pub fn pose(self, label: GestureLabel, duration: Duration) -> Self {
        self.hold(Cue::Pose(label), duration)
    }

    /// Single-frame touch
    pub fn touch(self, pixel: Point2) -> Self {
        self.cue(Cue::Touch(pixel))
    }

    /// Keep the fingertip on one pixel for `duration`
    pub fn rest(self, pixel: Point2, duration: Duration) -> Self {
        self.hold(Cue::Touch(pixel), duration)
    }

    /// Straight fingertip drag over `frames` frames, both ends included
    pub fn drag(mut self, from: Point2, to: Point2, frames: usize) -> Self {
        let frames = frames.max(2);
        for i in 0..frames {
            let t = i as f32 / (frames - 1) as f32;
            self = self.touch(from.lerp(&to, t));
        }
        self
    }

    /// One touch frame per point
    pub fn sweep(mut self, points: &[Point2]) -> Self {
        for p in points {
            self = self.touch(*p);
        }
        self
    }

    /// Move the script clock forward without emitting frames
    pub fn skip_to(mut self, t: FrameTime) -> Self {
        self.now = self.now.max(t);
        self
    }

    fn resolve(&self, cue: &Cue, rng: &mut StdRng) -> Vec<Vec<Point2>> {
        match cue {
            Cue::NoHand => Vec::new(),
            Cue::Pose(label) => {
                let hand = SyntheticHand::new(*label).jitter(self.jitter);
                vec![hand.points(rng)]
            }
            Cue::Touch(pixel) => {
                let hand = SyntheticHand::pointing().touching(*pixel, self.canvas);
                vec![hand.points().to_vec()]
            }
            Cue::Hand(hand) => vec![hand.points().to_vec()],
            Cue::Raw(hands) => hands.clone(),
        }
    }

    /// Game frames, malformed hands dropped
    pub fn frames(&self) -> Vec<Frame> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.cues
            .iter()
            .map(|(t, cue)| Frame::from_detection(*t, self.canvas, self.resolve(cue, &mut rng)))
            .collect()
    }

    /// Detector answers; `None` where no hand is visible
    pub fn detections(&self) -> Vec<(FrameTime, Option<Detection>)> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.cues
            .iter()
            .map(|(t, cue)| {
                let hands = self.resolve(cue, &mut rng);
                let detection = (!hands.is_empty()).then(|| Detection::new(hands));
                (*t, detection)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_advance_by_step() {
        let timeline = Timeline::standard()
            .idle(Duration::from_millis(99))
            .touch(Point2::new(10.0, 10.0));

        let times: Vec<u64> = timeline.cues().iter().map(|(t, _)| t.as_millis()).collect();
        assert_eq!(times, vec![0, 33, 66, 99]);
        assert_eq!(timeline.now(), FrameTime::from_millis(132));
    }

    #[test]
    fn test_drag_hits_both_ends() {
        let from = Point2::new(100.0, 100.0);
        let to = Point2::new(300.0, 100.0);
        let frames = Timeline::standard().drag(from, to, 5).frames();

        assert_eq!(frames.len(), 5);
        assert!(frames[0].fingertip().unwrap().distance(&from) < 1e-3);
        assert!(frames[4].fingertip().unwrap().distance(&to) < 1e-3);
    }

    #[test]
    fn test_malformed_raw_cue_has_no_hand() {
        let timeline = Timeline::standard().cue(Cue::Raw(vec![vec![Point2::new(0.5, 0.5); 4]]));
        assert!(!timeline.frames()[0].has_hand());
        assert!(timeline.detections()[0].1.is_some());
    }

    #[test]
    fn test_skip_to_leaves_gap() {
        let timeline = Timeline::standard()
            .touch(Point2::new(1.0, 1.0))
            .skip_to(FrameTime::from_millis(1_000))
            .touch(Point2::new(1.0, 1.0));
        assert_eq!(timeline.cues()[1].0, FrameTime::from_millis(1_000));
    }
}
