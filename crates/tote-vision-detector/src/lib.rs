//! Tote detector: picks the particle most likely to be a tote and estimates
//! how far away it is.
//!
//! Pipeline per frame:
//! 1. An external segmentation step produces [`ParticleReport`]s.
//! 2. Each candidate gets four shape scores ([`score_particle`]) which are
//!    folded into one composite.
//! 3. [`select_target`] walks candidates largest-first and returns the first
//!    one whose composite clears the configured floor.
//! 4. [`estimate_distance`] converts the selected box width to feet with a
//!    pinhole field-of-view model.
//!
//! [`FrameProcessor`] wires these steps to a [`ParticleSource`] and a
//! [`TelemetrySink`].
//!
//! [`ParticleReport`]: tote_vision_core::ParticleReport

pub mod distance;
pub mod frame;
pub mod normalize;
pub mod select;
pub mod shape;
pub mod source;
pub mod telemetry;

pub use distance::{
    estimate_distance, normalized_width, report_distance, try_estimate_distance, WIDTH_KEY,
};
pub use frame::{FrameOutcome, FrameProcessor, DISTANCE_KEY};
pub use normalize::ratio_to_score;
pub use select::{rank_candidates, select_target, TargetCandidate};
pub use shape::{
    fill_completeness_score, long_side_score, score_particle, short_side_score, trapezoid_score,
};
pub use source::{
    Frame, FrameRecording, ParticleSource, RecordedFailure, RecordedFrame, ReplaySource,
};
pub use telemetry::{LogTelemetry, RecordingTelemetry, TelemetrySink};
