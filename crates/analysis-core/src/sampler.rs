//! Frame sampling policy.
//!
//! Detection is by far the most expensive step in the pipeline, so only a
//! subset of frames is submitted for it. The stride is either fixed or
//! derived from the source frame rate (approximately one sample per second),
//! and an absolute frame-count ceiling bounds the run on long inputs.

use poselens_common::config::{DEFAULT_MAX_FRAMES, DEFAULT_STRIDE};

/// How the sampling stride is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrideMode {
    /// Analyze every Nth frame.
    Fixed(u32),

    /// Derive the stride from the reported frame rate: `round(fps)`,
    /// i.e. roughly one sample per second of video.
    PerSecond,
}

impl Default for StrideMode {
    fn default() -> Self {
        StrideMode::Fixed(DEFAULT_STRIDE)
    }
}

/// Selects which frame indices are submitted for detection.
#[derive(Debug, Clone, Copy)]
pub struct FrameSampler {
    stride: u64,
    max_frames: u64,
}

impl FrameSampler {
    /// Build a sampler from the configured mode and the source frame rate.
    ///
    /// A zero, negative, or NaN frame rate falls back to the fixed default
    /// stride; the resulting stride is never zero.
    pub fn new(mode: StrideMode, fps: f64, max_frames: u64) -> Self {
        let stride = match mode {
            StrideMode::Fixed(n) => u64::from(n.max(1)),
            StrideMode::PerSecond => {
                if fps.is_finite() && fps > 0.0 {
                    (fps.round() as u64).max(1)
                } else {
                    tracing::warn!(fps, "Unusable frame rate reported; using default stride");
                    u64::from(DEFAULT_STRIDE)
                }
            }
        };

        Self { stride, max_frames }
    }

    /// Sampler with the default fixed stride and frame ceiling.
    pub fn with_defaults() -> Self {
        Self::new(StrideMode::default(), 0.0, DEFAULT_MAX_FRAMES)
    }

    /// The effective stride in frames.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Whether the frame at `index` should be submitted for detection.
    pub fn should_submit(&self, index: u64) -> bool {
        index % self.stride == 0
    }

    /// Whether the absolute frame ceiling has been reached.
    ///
    /// Once true, processing terminates regardless of remaining video length.
    pub fn is_exhausted(&self, index: u64) -> bool {
        index >= self.max_frames
    }
}
