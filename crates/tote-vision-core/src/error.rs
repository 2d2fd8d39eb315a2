use serde::{Deserialize, Serialize};

/// Errors surfaced at the collaborator boundary of the vision pipeline.
///
/// None of these abort frame processing: a failed frame yields no
/// candidates and the next frame is processed normally.
///
/// Serializes externally tagged, e.g. `{ "threshold": "no pixels in range" }`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisionError {
    #[error("camera open failed: {0}")]
    CameraOpen(String),
    #[error("color threshold failed: {0}")]
    Threshold(String),
    #[error("particle filter failed: {0}")]
    ParticleFilter(String),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

/// Errors produced while loading or validating a [`crate::VisionConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
