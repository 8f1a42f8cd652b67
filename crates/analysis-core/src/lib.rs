//! Poselens Analysis Core
//!
//! Turns a stream of decoded video frames into a size-bounded analysis
//! summary:
//! - **Frame Sampler:** decide which frames are worth submitting for detection
//! - **Metric Calculator:** pure skeleton → biomechanical metrics
//! - **Keyframe Detector:** streaming selection of the lowest-center-of-gravity frame
//! - **Output Shaper:** bound the final payload regardless of video length
//!
//! This crate is pure computation — no I/O, no decode, no inference. The
//! frame source and the pose detector are capabilities injected through the
//! traits in [`pipeline`]; all inputs are data, all outputs are data.

pub mod keyframe;
pub mod metrics;
pub mod pipeline;
pub mod sampler;
pub mod shaper;

pub use keyframe::LowestCgTracker;
pub use pipeline::{run_analysis, FrameSource, PipelineOptions, PoseDetector};
pub use sampler::{FrameSampler, StrideMode};
pub use shaper::OutputShaper;
