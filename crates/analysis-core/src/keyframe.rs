//! Streaming keyframe detection.
//!
//! A single-pass maximum tracker over `hip_height`. Because image
//! coordinates grow downward, the frame with the largest hip_height is the
//! visual moment where the subject's center of gravity is physically lowest
//! (the bottom of a squat or lunge).

use poselens_pose_model::{FrameRecord, KeyFrameSet};

/// Tracks the lowest-center-of-gravity frame across the record stream.
#[derive(Debug, Clone, Default)]
pub struct LowestCgTracker {
    current_max: Option<f64>,
    best_frame: Option<FrameRecord>,
}

impl LowestCgTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one record in frame order.
    ///
    /// The tracked frame is replaced only on a strictly greater hip_height,
    /// so ties keep the earliest-seen frame.
    pub fn observe(&mut self, record: &FrameRecord) {
        let hip_height = record.metrics.hip_height;
        if self.current_max.map_or(true, |max| hip_height > max) {
            self.current_max = Some(hip_height);
            self.best_frame = Some(record.clone());
        }
    }

    /// Terminal state: the selected keyframes, or empty if no record ever
    /// carried a valid metric.
    pub fn finish(self) -> KeyFrameSet {
        KeyFrameSet {
            lowest_center_of_gravity: self.best_frame,
        }
    }
}
