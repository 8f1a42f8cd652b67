//! End-to-end pipeline run over a synthetic squat motion.

use poselens_analysis_core::{run_analysis, FrameSource, PipelineOptions, PoseDetector, StrideMode};
use poselens_common::error::PoselensResult;
use poselens_pose_model::{AnalysisResult, Landmark, PoseSkeleton, VideoFrame, LANDMARK_COUNT};

/// 300 frames at 30 fps. The subject's hips follow a dip: standing at
/// y = 0.5, bottoming out at y = 0.9 around frame 150, back up by the end.
struct SquatSource {
    frame: u64,
}

impl FrameSource for SquatSource {
    fn fps(&self) -> f64 {
        30.0
    }

    fn next_frame(&mut self) -> PoselensResult<Option<VideoFrame>> {
        if self.frame >= 300 {
            return Ok(None);
        }
        self.frame += 1;
        Ok(Some(VideoFrame::new(1, 1, vec![0, 0, 0])))
    }
}

struct SquatDetector {
    frame: u64,
}

fn hip_y_at(frame: u64) -> f64 {
    // Piecewise-linear dip peaking exactly at frame 150.
    let depth = 1.0 - ((frame as f64 - 150.0).abs() / 150.0);
    0.5 + 0.4 * depth
}

impl PoseDetector for SquatDetector {
    fn detect(
        &mut self,
        _frame: &VideoFrame,
        _timestamp_ms: u64,
    ) -> PoselensResult<Option<PoseSkeleton>> {
        let y = hip_y_at(self.frame);
        self.frame += 5; // detector sees every 5th frame under the stride below

        let mut landmarks = vec![Landmark::SENTINEL; LANDMARK_COUNT];
        landmarks[23] = Landmark::new(0.45, y, 0.0); // left hip
        landmarks[24] = Landmark::new(0.55, y, 0.0); // right hip
        landmarks[25] = Landmark::new(0.45, y + 0.02, 0.0); // left knee
        landmarks[26] = Landmark::new(0.55, y + 0.02, 0.0); // right knee
        landmarks[27] = Landmark::new(0.44, y + 0.05, 0.0); // left ankle
        landmarks[28] = Landmark::new(0.56, y + 0.05, 0.0); // right ankle
        Ok(Some(PoseSkeleton::new(landmarks)))
    }
}

fn run_squat() -> AnalysisResult {
    let mut source = SquatSource { frame: 0 };
    let mut detector = SquatDetector { frame: 0 };
    let options = PipelineOptions {
        stride_mode: StrideMode::Fixed(5),
        max_frames: 450,
        downsample: 6,
        keep_landmarks: false,
    };
    run_analysis(&mut source, &mut detector, options)
        .expect("squat fixture should analyze")
        .result
}

#[test]
fn squat_keyframe_lands_at_the_deepest_point() {
    let result = run_squat();
    let key = result
        .key_frames
        .lowest_center_of_gravity
        .expect("a keyframe should be selected");

    assert_eq!(key.frame_index, 150);
    assert_eq!(key.metrics.hip_height, 0.9);
}

#[test]
fn squat_summary_and_downsample_are_bounded() {
    let result = run_squat();

    // 300 frames, stride 5 → 60 records; every 6th → 10 reported.
    assert_eq!(result.summary.total_frames, 60);
    assert_eq!(result.sampled_frames.len(), 10);
    assert_eq!(result.sampled_frames[0].frame_index, 0);

    // Last record is frame 295 → 9833 ms → 9.83 s.
    assert!((result.summary.duration_sec - 9.83).abs() < 1e-9);
}

#[test]
fn squat_frame_list_is_strictly_increasing() {
    let result = run_squat();
    for pair in result.sampled_frames.windows(2) {
        assert!(pair[1].frame_index > pair[0].frame_index);
        assert!(pair[1].timestamp_sec > pair[0].timestamp_sec);
    }
}

#[test]
fn squat_payload_roundtrips_through_json() {
    let result = run_squat();
    let json = serde_json::to_string(&result).expect("payload serializes");
    let parsed: AnalysisResult = serde_json::from_str(&json).expect("payload parses");
    assert_eq!(result, parsed);
}
