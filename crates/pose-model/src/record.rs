//! Per-frame analysis records and final payloads.
//!
//! Records serialize with the compact wire keys consumed downstream
//! (`frame`, `timestamp`). A record is constructed exactly once, at the
//! moment a sampled frame yields a successful detection, and never mutated
//! afterward.

use serde::{Deserialize, Serialize};

use crate::landmark::Landmark;

/// Biomechanical metrics computed from one skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Left knee angle in degrees, `[0, 180]`, rounded to 1 decimal.
    pub knee_angle_left: f64,

    /// Right knee angle in degrees, `[0, 180]`, rounded to 1 decimal.
    pub knee_angle_right: f64,

    /// Mean hip y position, `[0, 1]`, rounded to 3 decimals.
    ///
    /// Image coordinates grow downward, so a *larger* value means the hips
    /// sit *lower* on screen — a lower physical center of gravity. Keyframe
    /// selection depends on this convention; do not flip it.
    pub hip_height: f64,
}

/// Metrics for one analyzed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Zero-based index of the frame in the source video.
    #[serde(rename = "frame")]
    pub frame_index: u64,

    /// Frame timestamp in seconds, rounded to 2 decimals.
    #[serde(rename = "timestamp")]
    pub timestamp_sec: f64,

    /// Computed metric set.
    pub metrics: MetricSet,
}

/// Notable frames selected by the keyframe detector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyFrameSet {
    /// Frame with the lowest physical center of gravity (largest hip_height).
    pub lowest_center_of_gravity: Option<FrameRecord>,
}

/// Run-level totals reported alongside the frame list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Number of frames that produced a record.
    pub total_frames: usize,

    /// Timestamp of the last analyzed frame, in seconds.
    pub duration_sec: f64,
}

/// The rich analysis payload: summary, keyframes, and a bounded frame list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    pub key_frames: KeyFrameSet,
    pub sampled_frames: Vec<FrameRecord>,
}

/// Raw landmarks for one frame, used by the landmarks-only payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePose {
    pub frame: u64,
    pub landmarks: Vec<Landmark>,
}

/// The landmarks-only payload variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePayload {
    pub status: String,
    pub frames_analyzed: usize,
    pub pose_data: Vec<FramePose>,
}

impl SimplePayload {
    pub fn success(pose_data: Vec<FramePose>) -> Self {
        Self {
            status: "success".to_string(),
            frames_analyzed: pose_data.len(),
            pose_data,
        }
    }
}
