//! Process-wide configuration for tote detection.
//!
//! A [`VisionConfig`] is built once at startup and passed by reference into
//! every scoring and distance call. The only field expected to change at
//! runtime is the color selection, and only through
//! [`VisionConfig::select_color`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::score::TargetSide;

/// Largest relative gap allowed between a configured aspect ratio and the
/// one implied by the side and height lengths.
const RATIO_TOLERANCE: f64 = 0.02;

/// Physical dimensions of the tote, in inches.
///
/// The aspect ratios are stored rounded; [`VisionConfig::validate`] rejects
/// a geometry whose ratios drift from its lengths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetGeometry {
    pub long_side_in: f64,
    pub short_side_in: f64,
    pub height_in: f64,
    /// Long side over height: 26.9 / 12.1 ~= 2.22.
    pub long_ratio: f64,
    /// Short side over height: 16.9 / 12.1 ~= 1.4.
    pub short_ratio: f64,
}

impl Default for TargetGeometry {
    fn default() -> Self {
        Self {
            long_side_in: 26.9,
            short_side_in: 16.9,
            height_in: 12.1,
            long_ratio: 2.22,
            short_ratio: 1.4,
        }
    }
}

impl TargetGeometry {
    /// Visible face width for the given orientation.
    pub fn side_width_in(&self, side: TargetSide) -> f64 {
        match side {
            TargetSide::Long => self.long_side_in,
            TargetSide::Short => self.short_side_in,
        }
    }

    /// Face width over height, straight from the lengths.
    pub fn implied_ratio(&self, side: TargetSide) -> f64 {
        self.side_width_in(side) / self.height_in
    }

    /// Expected bounding-box aspect ratio for the given orientation.
    pub fn aspect_ratio(&self, side: TargetSide) -> f64 {
        match side {
            TargetSide::Long => self.long_ratio,
            TargetSide::Short => self.short_ratio,
        }
    }
}

/// Relative weight of each shape score in the composite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub trapezoid: f64,
    pub long_aspect: f64,
    pub short_aspect: f64,
    pub fill_completeness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            trapezoid: 1.0,
            long_aspect: 1.0,
            short_aspect: 1.0,
            fill_completeness: 1.0,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.trapezoid + self.long_aspect + self.short_aspect + self.fill_completeness
    }
}

/// Candidate scoring and acceptance settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Multiplier on `area / convex_hull_area`. A real tote silhouette fills
    /// about 85% of its hull; 1.18 maps that to the ideal ratio of 1.
    pub fill_correction: f64,
    /// Expected `convex_hull_area / bounding_box_area` for an ideal tote.
    pub trapezoid_fill: f64,
    /// Particles below this percentage of the image area are ignored.
    pub area_minimum_percent: f64,
    /// Composite score floor for accepting a candidate.
    pub score_minimum: f64,
    pub weights: ScoreWeights,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            fill_correction: 1.18,
            trapezoid_fill: 0.954,
            area_minimum_percent: 2.0,
            score_minimum: 75.0,
            weights: ScoreWeights::default(),
        }
    }
}

/// Known cameras and their horizontal field of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraModel {
    AxisM1011,
    AxisM1013,
    Axis206,
    Hd3000Square,
    Hd3000Wide,
}

impl CameraModel {
    pub fn view_angle_deg(self) -> f64 {
        match self {
            CameraModel::AxisM1011 => 49.4,
            CameraModel::AxisM1013 => 64.0,
            CameraModel::Axis206 => 51.7,
            CameraModel::Hd3000Square => 52.0,
            // 640x480 mode
            CameraModel::Hd3000Wide => 60.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Full horizontal field of view in degrees.
    pub view_angle_deg: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        CameraParams::from(CameraModel::AxisM1011)
    }
}

impl From<CameraModel> for CameraParams {
    fn from(model: CameraModel) -> Self {
        Self {
            view_angle_deg: model.view_angle_deg(),
        }
    }
}

/// Inclusive channel range used by color thresholding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HsvRange {
    pub min: u8,
    pub max: u8,
}

impl HsvRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

/// HSV bounds handed to the external segmentation step. Nothing in the
/// scoring or distance code reads these.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRanges {
    pub hue: HsvRange,
    pub saturation: HsvRange,
    pub value: HsvRange,
}

/// Complete pipeline configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub target: TargetGeometry,
    pub scoring: ScoringParams,
    pub camera: CameraParams,
    pub color: ColorRanges,
}

impl VisionConfig {
    /// Replace the color selection. Every other field is left untouched.
    pub fn select_color(&mut self, hue: HsvRange, saturation: HsvRange, value: HsvRange) {
        self.color = ColorRanges {
            hue,
            saturation,
            value,
        };
    }

    /// Builder-style variant of [`Self::select_color`].
    pub fn with_color(mut self, hue: HsvRange, saturation: HsvRange, value: HsvRange) -> Self {
        self.select_color(hue, saturation, value);
        self
    }

    pub fn with_camera(mut self, model: CameraModel) -> Self {
        self.camera = CameraParams::from(model);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: VisionConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every numeric field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.target;
        positive("target.long_side_in", t.long_side_in)?;
        positive("target.short_side_in", t.short_side_in)?;
        positive("target.height_in", t.height_in)?;
        positive("target.long_ratio", t.long_ratio)?;
        positive("target.short_ratio", t.short_ratio)?;
        for (field, side) in [
            ("target.long_ratio", TargetSide::Long),
            ("target.short_ratio", TargetSide::Short),
        ] {
            let implied = t.implied_ratio(side);
            if (t.aspect_ratio(side) - implied).abs() > RATIO_TOLERANCE * implied {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "disagrees with the side and height lengths",
                });
            }
        }

        let s = &self.scoring;
        positive("scoring.fill_correction", s.fill_correction)?;
        positive("scoring.trapezoid_fill", s.trapezoid_fill)?;
        finite("scoring.area_minimum_percent", s.area_minimum_percent)?;
        finite("scoring.score_minimum", s.score_minimum)?;

        let w = &s.weights;
        for (field, v) in [
            ("scoring.weights.trapezoid", w.trapezoid),
            ("scoring.weights.long_aspect", w.long_aspect),
            ("scoring.weights.short_aspect", w.short_aspect),
            ("scoring.weights.fill_completeness", w.fill_completeness),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if w.total() <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.weights",
                reason: "at least one weight must be positive",
            });
        }

        let angle = self.camera.view_angle_deg;
        if !angle.is_finite() || angle <= 0.0 || angle >= 180.0 {
            return Err(ConfigError::InvalidValue {
                field: "camera.view_angle_deg",
                reason: "must lie in (0, 180)",
            });
        }

        for (field, r) in [
            ("color.hue", self.color.hue),
            ("color.saturation", self.color.saturation),
            ("color.value", self.color.value),
        ] {
            if r.min > r.max {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "min exceeds max",
                });
            }
        }
        Ok(())
    }
}

fn finite(field: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must be finite",
        })
    }
}

fn positive(field: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must be finite and positive",
        })
    }
}
