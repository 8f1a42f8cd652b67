//! Check decode and inference prerequisites.

use std::path::PathBuf;

use poselens_common::config::AnalyzerConfig;
use poselens_common::error::{PoselensError, PoselensResult};
use poselens_video_extract::source::decode_available;

pub fn run(config: &AnalyzerConfig, model: Option<PathBuf>) -> PoselensResult<()> {
    let mut ok = true;

    if decode_available() {
        eprintln!("  [ok] GStreamer decode stack available");
    } else {
        ok = false;
        eprintln!("  [!!] GStreamer unavailable — install the runtime and base/good plugin sets");
    }

    let model_path = model.unwrap_or_else(|| config.model_path.clone());
    if model_path.exists() {
        eprintln!("  [ok] Pose model asset found at {}", model_path.display());
    } else {
        ok = false;
        eprintln!(
            "  [!!] Pose model asset missing at {} — download a pose landmarker ONNX export or pass --model",
            model_path.display()
        );
    }

    if ok {
        eprintln!("All prerequisites satisfied.");
        Ok(())
    } else {
        Err(PoselensError::missing_dependency(
            "One or more prerequisites are missing (see diagnostics above)",
        ))
    }
}
