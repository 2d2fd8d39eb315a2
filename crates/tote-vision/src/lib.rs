//! Facade crate for the `tote-vision-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core types and the detector
//! - helpers that replay recorded particle frames through the detector
//! - (feature `cli`) the `tote-vision` command line tool
//!
//! ## Quickstart
//!
//! ```
//! use tote_vision::core::{BoundingRect, ImageSize, ParticleReport, VisionConfig};
//! use tote_vision::detector::{estimate_distance, select_target};
//!
//! let rect = BoundingRect::new(80.0, 60.0, 240.0, 132.0);
//! let hull = rect.area() * 0.954;
//! let particles = [ParticleReport {
//!     percent_area_to_image_area: 15.0,
//!     area: hull,
//!     convex_hull_area: hull,
//!     bounding_rect: rect,
//! }];
//!
//! let config = VisionConfig::default();
//! if let Some(tote) = select_target(&particles, &config) {
//!     let feet = estimate_distance(
//!         &tote.report,
//!         ImageSize::new(320, 240),
//!         config.camera.view_angle_deg,
//!         tote.scores.side(),
//!         &config.target,
//!     );
//!     println!("tote at {feet:?} ft");
//! }
//! ```
//!
//! ## API map
//! - `tote_vision::core`: particle reports, score sets, configuration, errors.
//! - `tote_vision::detector`: scorers, selection, distance, frame processing.
//! - `tote_vision::replay`: run a JSON frame recording end-to-end.

pub use tote_vision_core as core;
pub use tote_vision_detector as detector;

pub use tote_vision_core::{ParticleReport, ScoreSet, TargetSide, VisionConfig, VisionError};
pub use tote_vision_detector::{estimate_distance, select_target, FrameOutcome, TargetCandidate};

pub mod replay;
