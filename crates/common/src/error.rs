//! Error types shared across Poselens crates.

use std::path::PathBuf;

/// Top-level error type for Poselens operations.
///
/// Only fatal conditions are represented here. A frame in which no subject
/// was detected is not an error anywhere in the pipeline; it is reported as
/// an absent detection and the frame is dropped.
#[derive(Debug, thiserror::Error)]
pub enum PoselensError {
    #[error("Missing dependency: {message}")]
    MissingDependency { message: String },

    #[error("Pose model asset not found: {path}")]
    MissingModelAsset { path: PathBuf },

    #[error("Failed to open video source: {message}")]
    SourceOpen { message: String },

    #[error("Video decode error: {message}")]
    Decode { message: String },

    #[error("Pose detection error: {message}")]
    Detection { message: String },

    #[error("No valid pose data could be extracted from the video")]
    EmptyResult,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PoselensError.
pub type PoselensResult<T> = Result<T, PoselensError>;

impl PoselensError {
    pub fn missing_dependency(msg: impl Into<String>) -> Self {
        Self::MissingDependency {
            message: msg.into(),
        }
    }

    pub fn source_open(msg: impl Into<String>) -> Self {
        Self::SourceOpen {
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
