//! Candidate ranking and target selection.
//!
//! Candidates are visited largest area first and the first one whose
//! composite score clears `score_minimum` wins. A smaller particle with a
//! higher composite never displaces a larger acceptable one.

use log::debug;
use serde::{Deserialize, Serialize};
use tote_vision_core::{ParticleReport, ScoreSet, VisionConfig};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::shape::score_particle;

/// A scored particle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    /// Position of the particle in the input slice.
    pub index: usize,
    pub report: ParticleReport,
    pub scores: ScoreSet,
    pub composite: f64,
}

impl TargetCandidate {
    fn evaluate(index: usize, report: &ParticleReport, config: &VisionConfig) -> Self {
        let scores = score_particle(report, config);
        let composite = scores.composite(&config.scoring.weights);
        debug!(
            "particle {index}: area {:.2}% trap {:.1} long {:.1} short {:.1} fill {:.1} -> {:.1}",
            report.percent_area_to_image_area,
            scores.trapezoid,
            scores.long_aspect,
            scores.short_aspect,
            scores.fill_completeness,
            composite
        );
        Self {
            index,
            report: *report,
            scores,
            composite,
        }
    }

    pub fn is_accepted(&self, config: &VisionConfig) -> bool {
        self.composite >= config.scoring.score_minimum
    }
}

/// Stable descending sort on a float key. NaN keys sort last.
fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        let (ka, kb) = (key(a), key(b));
        match (ka.is_nan(), kb.is_nan()) {
            (false, false) => kb.total_cmp(&ka),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        }
    });
}

/// Particles passing the area pre-filter, largest first. Equal areas keep
/// their input order.
fn eligible<'a>(
    reports: &'a [ParticleReport],
    config: &VisionConfig,
) -> Vec<(usize, &'a ParticleReport)> {
    let min = config.scoring.area_minimum_percent;
    let mut out: Vec<(usize, &ParticleReport)> = reports
        .iter()
        .enumerate()
        .filter(|(_, r)| r.percent_area_to_image_area >= min)
        .collect();
    sort_desc_by(&mut out, |(_, r)| r.percent_area_to_image_area);
    out
}

/// Score every eligible particle, in selection order.
pub fn rank_candidates(reports: &[ParticleReport], config: &VisionConfig) -> Vec<TargetCandidate> {
    eligible(reports, config)
        .into_iter()
        .map(|(idx, r)| TargetCandidate::evaluate(idx, r, config))
        .collect()
}

/// Pick the tote among the particles of one frame.
///
/// Returns `None` when no particle qualifies; that is a normal result for
/// a frame without a visible tote.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(reports, config), fields(particles = reports.len()))
)]
pub fn select_target(reports: &[ParticleReport], config: &VisionConfig) -> Option<TargetCandidate> {
    let found = eligible(reports, config)
        .into_iter()
        .map(|(idx, r)| TargetCandidate::evaluate(idx, r, config))
        .find(|c| c.is_accepted(config));
    if found.is_none() {
        debug!("no particle reached score {:.1}", config.scoring.score_minimum);
    }
    found
}
