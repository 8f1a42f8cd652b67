//! Poselens Pose Model
//!
//! Core data model shared across Poselens crates:
//! - Landmarks and pose skeletons with defensive indexed access
//! - Per-frame analysis records and metric sets
//! - Final analysis payloads (rich and landmarks-only variants)
//! - Raw video frame container handed across the decode/detect boundary
//!
//! All coordinates are normalized to `[0.0, 1.0]` relative to the image,
//! with the origin at the top-left and the y axis increasing downward.

pub mod frame;
pub mod landmark;
pub mod record;

pub use frame::VideoFrame;
pub use landmark::{Landmark, LandmarkIndex, PoseSkeleton, LANDMARK_COUNT};
pub use record::{
    AnalysisResult, AnalysisSummary, FramePose, FrameRecord, KeyFrameSet, MetricSet, SimplePayload,
};
