use serde::{Deserialize, Serialize};

use crate::config::ScoreWeights;

/// Which face of the tote is assumed to be facing the camera.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSide {
    Long,
    Short,
}

/// Per-candidate shape scores, each in `[0, 100]`.
///
/// A value type recomputed on every evaluation; nothing caches it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub trapezoid: f64,
    pub long_aspect: f64,
    pub short_aspect: f64,
    pub fill_completeness: f64,
}

impl ScoreSet {
    /// Weighted mean of the four scores. With the default (equal) weights
    /// this is the plain arithmetic mean.
    pub fn composite(&self, weights: &ScoreWeights) -> f64 {
        let total = weights.total();
        if total <= 0.0 || !total.is_finite() {
            return 0.0;
        }
        let sum = self.trapezoid * weights.trapezoid
            + self.long_aspect * weights.long_aspect
            + self.short_aspect * weights.short_aspect
            + self.fill_completeness * weights.fill_completeness;
        sum / total
    }

    /// Orientation hypothesis with the higher aspect score. Ties favor the
    /// long side.
    pub fn side(&self) -> TargetSide {
        if self.long_aspect >= self.short_aspect {
            TargetSide::Long
        } else {
            TargetSide::Short
        }
    }
}
