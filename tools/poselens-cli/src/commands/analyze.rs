//! Analyze a movement video and emit the JSON payload.

use std::path::PathBuf;

use poselens_analysis_core::{run_analysis, PipelineOptions, StrideMode};
use poselens_common::config::AnalyzerConfig;
use poselens_common::error::PoselensResult;
use poselens_pose_model::SimplePayload;
use poselens_video_extract::{GstFrameSource, OnnxPoseDetector};

/// Markers bounding the debug copy of the payload on stderr.
const POSE_DATA_START: &str = "=== POSE_DATA_START ===";
const POSE_DATA_END: &str = "=== POSE_DATA_END ===";

pub struct AnalyzeArgs {
    pub video: PathBuf,
    pub model: Option<PathBuf>,
    pub stride: Option<u32>,
    pub per_second: bool,
    pub max_frames: Option<u64>,
    pub downsample: Option<usize>,
    pub simple: bool,
}

pub fn run(config: &AnalyzerConfig, args: AnalyzeArgs) -> PoselensResult<()> {
    tracing::info!(video = %args.video.display(), "Analyzing video");

    let model_path = args.model.unwrap_or_else(|| config.model_path.clone());
    let stride_mode = if args.per_second || (config.analysis.per_second && args.stride.is_none()) {
        StrideMode::PerSecond
    } else {
        StrideMode::Fixed(args.stride.unwrap_or(config.analysis.stride))
    };
    let options = PipelineOptions {
        stride_mode,
        max_frames: args.max_frames.unwrap_or(config.analysis.max_frames),
        downsample: args.downsample.unwrap_or(config.analysis.downsample),
        keep_landmarks: args.simple,
    };

    // Detector and source are scoped to this call: whatever path we leave
    // through, both are dropped and their resources released.
    let mut detector = OnnxPoseDetector::load(&model_path)?;
    let mut source = GstFrameSource::open(&args.video)?;

    let output = run_analysis(&mut source, &mut detector, options)?;

    let payload = if args.simple {
        serde_json::to_string(&SimplePayload::success(output.raw_poses))?
    } else {
        serde_json::to_string(&output.result)?
    };

    tracing::info!(
        total_frames = output.result.summary.total_frames,
        duration_sec = output.result.summary.duration_sec,
        "Analysis complete"
    );

    // Delimited debug copy on the diagnostic channel.
    eprintln!("\n{POSE_DATA_START}");
    eprintln!("{payload}");
    eprintln!("{POSE_DATA_END}");

    // Exactly one line on the primary channel, written only now that the
    // whole payload exists — never a partial one.
    println!("{payload}");

    Ok(())
}
