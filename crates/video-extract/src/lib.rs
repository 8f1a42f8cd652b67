//! Poselens Video Extract
//!
//! Bindings to the pipeline's two external collaborators:
//! - **Frame source:** GStreamer-based video file decoding to RGB frames
//! - **Pose detector:** ONNX Runtime pose landmarker inference
//!
//! Both are constructed once per run by the caller and injected into the
//! analysis pipeline through the `poselens-analysis-core` traits. Their
//! resources are released on drop, on every exit path.

pub mod detector;
pub mod source;

pub use detector::OnnxPoseDetector;
pub use source::GstFrameSource;
