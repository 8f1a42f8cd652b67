//! Application configuration.
//!
//! Configuration is loaded explicitly and handed into the pipeline by the
//! caller. Nothing in the analysis core reads ambient global state; the
//! model asset path in particular is a plain config value, not a process-wide
//! constant.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default sampling stride when no frame rate is available.
pub const DEFAULT_STRIDE: u32 = 5;

/// Default absolute ceiling on processed frames (about 15 seconds at 30 fps).
pub const DEFAULT_MAX_FRAMES: u64 = 450;

/// Default secondary downsample factor applied by the output shaper.
pub const DEFAULT_DOWNSAMPLE: usize = 6;

/// Global analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Path to the pose landmarker model asset.
    pub model_path: PathBuf,

    /// Default analysis settings.
    pub analysis: AnalysisDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    /// Fixed sampling stride (analyze every Nth frame).
    pub stride: u32,

    /// Derive the stride from the source frame rate (one sample per second)
    /// instead of using the fixed stride.
    pub per_second: bool,

    /// Hard ceiling on the number of frames read from the source.
    pub max_frames: u64,

    /// Secondary downsample factor for the reported frame list.
    pub downsample: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "poselens=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/pose_landmarker.onnx"),
            analysis: AnalysisDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            per_second: false,
            max_frames: DEFAULT_MAX_FRAMES,
            downsample: DEFAULT_DOWNSAMPLE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AnalyzerConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("poselens").join("config.json")
}
