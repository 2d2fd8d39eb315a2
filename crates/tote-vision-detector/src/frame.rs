//! Per-frame driver: source -> selection -> distance -> telemetry.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tote_vision_core::{HsvRange, ImageSize, TargetSide, VisionConfig, VisionError};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::distance::report_distance;
use crate::select::{select_target, TargetCandidate};
use crate::source::ParticleSource;
use crate::telemetry::TelemetrySink;

/// Telemetry key for the estimated distance in feet.
pub const DISTANCE_KEY: &str = "Distance";

/// What one frame produced.
///
/// A source failure and an empty scene both leave `target` empty; `error`
/// tells them apart for callers that track failure streaks, and keeps the
/// failure kind so they can react to it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub image: Option<ImageSize>,
    pub particles: usize,
    pub target: Option<TargetCandidate>,
    pub side: Option<TargetSide>,
    pub distance_ft: Option<f64>,
    pub error: Option<VisionError>,
}

impl FrameOutcome {
    fn failed(err: VisionError) -> Self {
        Self {
            error: Some(err),
            ..Self::default()
        }
    }
}

/// Runs the detector on every frame pulled from `source`.
pub struct FrameProcessor<S, T> {
    config: VisionConfig,
    source: S,
    sink: T,
}

impl<S: ParticleSource, T: TelemetrySink> FrameProcessor<S, T> {
    pub fn new(config: VisionConfig, source: S, sink: T) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }

    pub fn into_parts(self) -> (VisionConfig, S, T) {
        (self.config, self.source, self.sink)
    }

    /// Switch the color the source thresholds on. Takes effect from the
    /// next frame.
    pub fn select_color(&mut self, hue: HsvRange, saturation: HsvRange, value: HsvRange) {
        self.config.select_color(hue, saturation, value);
        info!(
            "color selection: hue {}..={} sat {}..={} val {}..={}",
            hue.min, hue.max, saturation.min, saturation.max, value.min, value.max
        );
    }

    /// Process one frame. Never fails: source errors are logged and come
    /// back inside the outcome.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn process_frame(&mut self) -> FrameOutcome {
        let frame = match self.source.next_frame(&self.config.color) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("frame skipped: {err}");
                return FrameOutcome::failed(err);
            }
        };

        let mut outcome = FrameOutcome {
            image: Some(frame.image),
            particles: frame.particles.len(),
            ..FrameOutcome::default()
        };

        let Some(target) = select_target(&frame.particles, &self.config) else {
            debug!("no tote among {} particles", frame.particles.len());
            return outcome;
        };

        let side = target.scores.side();
        outcome.target = Some(target);
        outcome.side = Some(side);

        match report_distance(
            &target.report,
            frame.image,
            side,
            &self.config,
            &mut self.sink,
        ) {
            Ok(distance) => {
                self.sink.put_number(DISTANCE_KEY, distance);
                debug!(
                    "tote at particle {} ({:?} side, score {:.1}): {:.2} ft",
                    target.index, side, target.composite, distance
                );
                outcome.distance_ft = Some(distance);
            }
            Err(err) => {
                debug!("tote at particle {}: {err}", target.index);
            }
        }
        outcome
    }
}
