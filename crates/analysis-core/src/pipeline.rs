//! The single-pass analysis pipeline.
//!
//! Data flows strictly forward in one pass over the video:
//! source → sampler → detector → metrics → keyframe tracker → shaper.
//!
//! The frame source and the pose detector are injected capabilities. They
//! are constructed once by the caller, used synchronously (the detector call
//! is the pipeline's only blocking point), and released by their own `Drop`
//! on every exit path. No retries anywhere: a frame with no detection is
//! dropped and processing continues.

use poselens_common::error::{PoselensError, PoselensResult};
use poselens_pose_model::{AnalysisResult, FramePose, FrameRecord, PoseSkeleton, VideoFrame};

use crate::keyframe::LowestCgTracker;
use crate::metrics::{compute_metrics, round_to};
use crate::sampler::{FrameSampler, StrideMode};
use crate::shaper::OutputShaper;

/// Nominal frame rate used for timestamps when the source reports none.
const NOMINAL_FPS: f64 = 30.0;

/// Progress narration cadence, in frames.
const PROGRESS_INTERVAL: u64 = 60;

/// Sequential frame supplier.
///
/// `next_frame` yields decoded frames in order and `Ok(None)` at end of
/// stream. Implementations own their decode resources and release them on
/// drop.
pub trait FrameSource {
    /// Nominal frame rate reported by the container, or a non-positive value
    /// when unavailable.
    fn fps(&self) -> f64;

    /// The next frame in sequence, or `None` at end of stream.
    fn next_frame(&mut self) -> PoselensResult<Option<VideoFrame>>;
}

/// Pose detection capability for a single frame.
///
/// Single-person mode: at most one skeleton per frame. An absent detection
/// is not an error; the pipeline skips the frame and continues.
pub trait PoseDetector {
    /// Detect the subject's skeleton in `frame` at the given video timestamp.
    fn detect(
        &mut self,
        frame: &VideoFrame,
        timestamp_ms: u64,
    ) -> PoselensResult<Option<PoseSkeleton>>;
}

/// Options for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Sampling stride strategy.
    pub stride_mode: StrideMode,

    /// Hard ceiling on frames read from the source.
    pub max_frames: u64,

    /// Secondary downsample factor applied by the output shaper.
    pub downsample: usize,

    /// Retain raw landmarks per analyzed frame (for the landmarks-only
    /// payload variant). Off by default to keep memory use down.
    pub keep_landmarks: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let defaults = poselens_common::config::AnalysisDefaults::default();
        Self {
            stride_mode: StrideMode::Fixed(defaults.stride),
            max_frames: defaults.max_frames,
            downsample: defaults.downsample,
            keep_landmarks: false,
        }
    }
}

impl PipelineOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &poselens_common::config::AnalysisDefaults) -> Self {
        Self {
            stride_mode: if config.per_second {
                StrideMode::PerSecond
            } else {
                StrideMode::Fixed(config.stride)
            },
            max_frames: config.max_frames,
            downsample: config.downsample,
            keep_landmarks: false,
        }
    }
}

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// The shaped, size-bounded payload.
    pub result: AnalysisResult,

    /// Raw landmarks per analyzed frame; populated only when
    /// `keep_landmarks` was set.
    pub raw_poses: Vec<FramePose>,
}

/// Run the analysis pipeline to completion.
///
/// Strictly single-threaded and sequential: one pass over the source, one
/// synchronous detector call per sampled frame. Terminates at end of stream
/// or at the configured frame ceiling, whichever comes first.
///
/// Fails with [`PoselensError::EmptyResult`] when no frame produced a valid
/// metric record.
pub fn run_analysis(
    source: &mut dyn FrameSource,
    detector: &mut dyn PoseDetector,
    options: PipelineOptions,
) -> PoselensResult<AnalysisOutput> {
    let fps = source.fps();
    let sampler = FrameSampler::new(options.stride_mode, fps, options.max_frames);

    // Timestamps need some nominal rate even when the container reports
    // none; the sampler applies its own stride fallback independently.
    let effective_fps = if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        NOMINAL_FPS
    };

    tracing::info!(fps, stride = sampler.stride(), "Starting pose analysis");

    let mut tracker = LowestCgTracker::new();
    let mut records: Vec<FrameRecord> = Vec::new();
    let mut raw_poses: Vec<FramePose> = Vec::new();
    let mut frame_index: u64 = 0;

    while !sampler.is_exhausted(frame_index) {
        let Some(frame) = source.next_frame()? else {
            break;
        };

        if sampler.should_submit(frame_index) {
            let timestamp_ms = (frame_index as f64 * 1000.0 / effective_fps) as u64;

            if let Some(skeleton) = detector.detect(&frame, timestamp_ms)? {
                let metrics = compute_metrics(&skeleton);
                let record = FrameRecord {
                    frame_index,
                    timestamp_sec: round_to(timestamp_ms as f64 / 1000.0, 2),
                    metrics,
                };

                tracker.observe(&record);
                if options.keep_landmarks {
                    raw_poses.push(FramePose {
                        frame: frame_index,
                        landmarks: skeleton.landmarks,
                    });
                }
                records.push(record);
            } else {
                tracing::trace!(frame = frame_index, "No subject detected");
            }
        }

        frame_index += 1;
        if frame_index % PROGRESS_INTERVAL == 0 {
            tracing::info!(frames = frame_index, analyzed = records.len(), "Processing");
        }
    }

    tracing::info!(
        frames_read = frame_index,
        frames_analyzed = records.len(),
        "Analysis pass complete"
    );

    let shaper = OutputShaper::new(options.downsample);
    let result = shaper
        .shape(records, tracker.finish())
        .ok_or(PoselensError::EmptyResult)?;

    Ok(AnalysisOutput { result, raw_poses })
}
