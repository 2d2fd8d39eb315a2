//! Shape scorers. Each reduces one geometric comparison to a ratio with an
//! ideal value of 1 and maps it through [`ratio_to_score`].
//!
//! Degenerate geometry (zero hull area, zero-area or zero-height box)
//! scores 0 instead of dividing by zero.

use tote_vision_core::{
    ParticleReport, ScoreSet, ScoringParams, TargetGeometry, TargetSide, VisionConfig,
};

use crate::normalize::ratio_to_score;

/// How solid the particle is relative to its convex hull. Particles with
/// holes or ragged edges score lower.
pub fn fill_completeness_score(report: &ParticleReport, params: &ScoringParams) -> f64 {
    if report.convex_hull_area <= 0.0 {
        return 0.0;
    }
    ratio_to_score(report.area / report.convex_hull_area * params.fill_correction)
}

/// How well the convex hull fills the bounding box, relative to the fill
/// expected of an ideal tote face.
pub fn trapezoid_score(report: &ParticleReport, params: &ScoringParams) -> f64 {
    let box_area = report.bounding_rect.area();
    if box_area <= 0.0 {
        return 0.0;
    }
    ratio_to_score(report.convex_hull_area / (box_area * params.trapezoid_fill))
}

fn aspect_score(report: &ParticleReport, target: &TargetGeometry, side: TargetSide) -> f64 {
    match report.bounding_rect.aspect() {
        Some(aspect) => ratio_to_score(aspect / target.aspect_ratio(side)),
        None => 0.0,
    }
}

/// Aspect match under the hypothesis that the long face is visible.
pub fn long_side_score(report: &ParticleReport, target: &TargetGeometry) -> f64 {
    aspect_score(report, target, TargetSide::Long)
}

/// Aspect match under the hypothesis that the short face is visible.
pub fn short_side_score(report: &ParticleReport, target: &TargetGeometry) -> f64 {
    aspect_score(report, target, TargetSide::Short)
}

/// Compute all four shape scores for one particle.
pub fn score_particle(report: &ParticleReport, config: &VisionConfig) -> ScoreSet {
    ScoreSet {
        trapezoid: trapezoid_score(report, &config.scoring),
        long_aspect: long_side_score(report, &config.target),
        short_aspect: short_side_score(report, &config.target),
        fill_completeness: fill_completeness_score(report, &config.scoring),
    }
}
