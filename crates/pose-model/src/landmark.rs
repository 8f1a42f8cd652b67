//! Landmarks and pose skeletons.
//!
//! A skeleton is the ordered landmark list for one detected subject,
//! following the standard 33-point full-body layout. Skeletons may arrive
//! truncated from the detector; indexed access therefore never fails and
//! returns a zero sentinel for anything out of range.

use serde::{Deserialize, Serialize};

/// Number of anatomical points in a complete skeleton.
pub const LANDMARK_COUNT: usize = 33;

/// One detected anatomical point, normalized to image coordinates.
///
/// `x` and `y` are in `[0.0, 1.0]` with the origin at the top-left of the
/// image. `z` is an optional relative depth and defaults to 0 when the
/// detector does not provide it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The sentinel returned for out-of-range skeleton lookups.
    pub const SENTINEL: Landmark = Landmark {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Indices of the full-body pose layout.
///
/// Only the lower-body points participate in the current metric set, but the
/// full layout is kept so raw landmark output stays addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Ordered landmark sequence for one detected subject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseSkeleton {
    pub landmarks: Vec<Landmark>,
}

impl PoseSkeleton {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Landmark at the given anatomical index.
    ///
    /// Returns the zero sentinel when the skeleton is truncated and the
    /// index is out of range, so downstream metric computation never fails
    /// on a malformed detection.
    pub fn landmark(&self, index: LandmarkIndex) -> Landmark {
        self.landmarks
            .get(index as usize)
            .copied()
            .unwrap_or(Landmark::SENTINEL)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_skeleton() -> PoseSkeleton {
        let landmarks = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f64 / 100.0, i as f64 / 50.0, 0.0))
            .collect();
        PoseSkeleton::new(landmarks)
    }

    #[test]
    fn test_landmark_lookup_in_range() {
        let skeleton = full_skeleton();
        let hip = skeleton.landmark(LandmarkIndex::LeftHip);
        assert!((hip.x - 0.23).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_skeleton_returns_sentinel() {
        // Only the first 11 points present — everything below the shoulders
        // is missing.
        let skeleton = PoseSkeleton::new(vec![Landmark::new(0.5, 0.5, 0.0); 11]);
        let knee = skeleton.landmark(LandmarkIndex::LeftKnee);
        assert_eq!(knee, Landmark::SENTINEL);
    }

    #[test]
    fn test_empty_skeleton_returns_sentinel() {
        let skeleton = PoseSkeleton::default();
        assert_eq!(skeleton.landmark(LandmarkIndex::Nose), Landmark::SENTINEL);
        assert_eq!(
            skeleton.landmark(LandmarkIndex::RightFootIndex),
            Landmark::SENTINEL
        );
    }

    #[test]
    fn test_landmark_z_defaults_when_absent() {
        let parsed: Landmark = serde_json::from_str(r#"{"x":0.4,"y":0.6}"#).unwrap();
        assert_eq!(parsed.z, 0.0);
        assert!((parsed.x - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_landmark_roundtrip() {
        let lm = Landmark::new(0.12, 0.34, -0.05);
        let json = serde_json::to_string(&lm).unwrap();
        let parsed: Landmark = serde_json::from_str(&json).unwrap();
        assert_eq!(lm, parsed);
    }
}
