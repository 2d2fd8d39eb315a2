//! Core types and configuration for tote target detection.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any camera, segmentation backend or image type: particles come
//! in as plain descriptors produced by an external blob analysis step.

mod config;
mod error;
mod logger;
mod particle;
mod score;

pub use config::{
    CameraModel, CameraParams, ColorRanges, HsvRange, ScoreWeights, ScoringParams,
    TargetGeometry, VisionConfig,
};
pub use error::{ConfigError, VisionError};
pub use particle::{BoundingRect, ImageSize, ParticleReport};
pub use score::{ScoreSet, TargetSide};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
