//! ONNX Runtime pose landmarker binding.
//!
//! Wraps a single-person pose landmarker model exported to ONNX. The model
//! asset must exist at the configured path before the session is created;
//! its absence is a fatal precondition for the whole run, not a per-frame
//! condition. Per-frame misses (no subject in view) are reported as absent
//! detections and never as errors.

use std::path::Path;

use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;

use poselens_analysis_core::PoseDetector;
use poselens_common::error::{PoselensError, PoselensResult};
use poselens_pose_model::{Landmark, PoseSkeleton, VideoFrame, LANDMARK_COUNT};

/// Model input edge length in pixels.
const MODEL_INPUT: usize = 256;

/// Values per landmark in the model output: x, y, z, visibility, presence.
const VALUES_PER_LANDMARK: usize = 5;

/// Minimum mean presence score for a detection to count as a hit.
const PRESENCE_THRESHOLD: f64 = 0.5;

/// Single-person pose landmarker backed by an ONNX session.
#[derive(Debug)]
pub struct OnnxPoseDetector {
    session: Session,
    input_name: String,
    output_name: String,
}

impl OnnxPoseDetector {
    /// Load the landmarker model from `model_path`.
    ///
    /// The asset must already exist; there is no download-on-demand. Session
    /// construction failures surface as missing-dependency errors with
    /// remediation guidance.
    pub fn load(model_path: &Path) -> PoselensResult<Self> {
        if !model_path.exists() {
            return Err(PoselensError::MissingModelAsset {
                path: model_path.to_path_buf(),
            });
        }

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|e| {
                PoselensError::missing_dependency(format!(
                    "Failed to load pose model from {}: {e}. \
                     Verify the ONNX Runtime library is installed and the asset is a valid pose landmarker export.",
                    model_path.display()
                ))
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| PoselensError::detection("Pose model declares no inputs"))?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PoselensError::detection("Pose model declares no outputs"))?;

        tracing::debug!(
            path = %model_path.display(),
            input = %input_name,
            output = %output_name,
            "Loaded pose landmarker model"
        );

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// Scale a frame into the model input tensor, NHWC, `[0, 1]` floats.
    fn preprocess(frame: &VideoFrame) -> Array4<f32> {
        let mut input = Array4::<f32>::zeros((1, MODEL_INPUT, MODEL_INPUT, 3));

        for ty in 0..MODEL_INPUT {
            let sy = (ty as u64 * u64::from(frame.height) / MODEL_INPUT as u64) as u32;
            for tx in 0..MODEL_INPUT {
                let sx = (tx as u64 * u64::from(frame.width) / MODEL_INPUT as u64) as u32;
                let (r, g, b) = frame.rgb_at(sx, sy);
                input[[0, ty, tx, 0]] = f32::from(r) / 255.0;
                input[[0, ty, tx, 1]] = f32::from(g) / 255.0;
                input[[0, ty, tx, 2]] = f32::from(b) / 255.0;
            }
        }

        input
    }
}

impl PoseDetector for OnnxPoseDetector {
    fn detect(
        &mut self,
        frame: &VideoFrame,
        _timestamp_ms: u64,
    ) -> PoselensResult<Option<PoseSkeleton>> {
        let input = Self::preprocess(frame);
        let input_tensor = Tensor::from_array(input)
            .map_err(|e| PoselensError::detection(format!("Failed to build input tensor: {e}")))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| PoselensError::detection(format!("Inference failed: {e}")))?;

        let raw: ndarray::ArrayViewD<f32> = outputs[self.output_name.as_str()]
            .try_extract_array()
            .map_err(|e| PoselensError::detection(format!("Failed to read model output: {e}")))?;

        let flat: Vec<f32> = raw.iter().copied().collect();
        Ok(parse_landmarks(&flat))
    }
}

/// Decode the flattened landmarker output into a skeleton.
///
/// Expects `LANDMARK_COUNT * 5` values: x, y, z in model-input pixel units
/// followed by visibility and presence logits per landmark. A detection
/// whose mean presence falls below the threshold is a miss, not an error.
fn parse_landmarks(flat: &[f32]) -> Option<PoseSkeleton> {
    if flat.len() < LANDMARK_COUNT * VALUES_PER_LANDMARK {
        tracing::warn!(
            values = flat.len(),
            "Unexpected landmarker output shape; treating frame as a miss"
        );
        return None;
    }

    let mut landmarks = Vec::with_capacity(LANDMARK_COUNT);
    let mut presence_sum = 0.0;

    for i in 0..LANDMARK_COUNT {
        let base = i * VALUES_PER_LANDMARK;
        landmarks.push(Landmark::new(
            f64::from(flat[base]) / MODEL_INPUT as f64,
            f64::from(flat[base + 1]) / MODEL_INPUT as f64,
            f64::from(flat[base + 2]) / MODEL_INPUT as f64,
        ));
        presence_sum += sigmoid(f64::from(flat[base + 4]));
    }

    if presence_sum / (LANDMARK_COUNT as f64) < PRESENCE_THRESHOLD {
        return None;
    }

    Some(PoseSkeleton::new(landmarks))
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
