//! Pinhole distance model using the camera's horizontal field of view.
//!
//! With `w` the particle width as a fraction of the image width, doubled,
//! and `W` the physical width of the visible tote face:
//!
//! ```text
//! distance_ft = W / (w * 12 * tan(view_angle / 2))
//! ```

use tote_vision_core::{
    ImageSize, ParticleReport, TargetGeometry, TargetSide, VisionConfig, VisionError,
};

use crate::telemetry::TelemetrySink;

/// Telemetry key for the normalized particle width.
pub const WIDTH_KEY: &str = "Width";

const INCHES_PER_FOOT: f64 = 12.0;

/// Twice the particle width over the image width. `None` for a zero-width
/// image.
pub fn normalized_width(report: &ParticleReport, image: ImageSize) -> Option<f64> {
    if image.width == 0 {
        return None;
    }
    Some(2.0 * report.bounding_rect.width() / f64::from(image.width))
}

/// Distance in feet to the tote face described by `report`.
///
/// `side` must come from the caller (typically [`tote_vision_core::ScoreSet::side`]);
/// this function does not guess orientation.
pub fn try_estimate_distance(
    report: &ParticleReport,
    image: ImageSize,
    view_angle_deg: f64,
    side: TargetSide,
    target: &TargetGeometry,
) -> Result<f64, VisionError> {
    let width = normalized_width(report, image)
        .ok_or_else(|| degenerate("image width is zero"))?;
    if width.is_nan() || width <= 0.0 {
        return Err(degenerate("particle width is zero"));
    }
    let half_fov = (view_angle_deg.to_radians() / 2.0).tan();
    if !half_fov.is_finite() || half_fov <= 0.0 {
        return Err(degenerate("view angle out of range"));
    }
    let distance = target.side_width_in(side) / (width * INCHES_PER_FOOT * half_fov);
    if !distance.is_finite() {
        return Err(degenerate("distance is not finite"));
    }
    Ok(distance)
}

fn degenerate(reason: &str) -> VisionError {
    VisionError::DegenerateGeometry(reason.to_owned())
}

/// [`try_estimate_distance`] with "undefined distance" as `None`.
pub fn estimate_distance(
    report: &ParticleReport,
    image: ImageSize,
    view_angle_deg: f64,
    side: TargetSide,
    target: &TargetGeometry,
) -> Option<f64> {
    try_estimate_distance(report, image, view_angle_deg, side, target).ok()
}

/// Estimate distance from the configured camera and target, publishing the
/// normalized width under [`WIDTH_KEY`] on the way.
pub fn report_distance(
    report: &ParticleReport,
    image: ImageSize,
    side: TargetSide,
    config: &VisionConfig,
    sink: &mut dyn TelemetrySink,
) -> Result<f64, VisionError> {
    if let Some(width) = normalized_width(report, image) {
        sink.put_number(WIDTH_KEY, width);
    }
    try_estimate_distance(
        report,
        image,
        config.camera.view_angle_deg,
        side,
        &config.target,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::RecordingTelemetry;
    use approx::assert_abs_diff_eq;
    use tote_vision_core::{BoundingRect, HsvRange};

    fn boxed(left: f64, right: f64) -> ParticleReport {
        ParticleReport {
            percent_area_to_image_area: 10.0,
            area: 1.0,
            convex_hull_area: 1.0,
            bounding_rect: BoundingRect::new(left, 40.0, right, 112.0),
        }
    }

    #[test]
    fn half_image_long_face_at_m1011_fov() {
        let r = boxed(80.0, 240.0);
        let image = ImageSize::new(320, 240);
        assert_eq!(normalized_width(&r, image), Some(1.0));

        let d = estimate_distance(&r, image, 49.4, TargetSide::Long, &TargetGeometry::default())
            .expect("distance");
        assert_abs_diff_eq!(d, 4.88, epsilon = 0.05);
    }

    #[test]
    fn short_face_scales_with_physical_width() {
        let r = boxed(80.0, 240.0);
        let image = ImageSize::new(320, 240);
        let target = TargetGeometry::default();
        let long = estimate_distance(&r, image, 49.4, TargetSide::Long, &target).expect("long");
        let short = estimate_distance(&r, image, 49.4, TargetSide::Short, &target).expect("short");
        assert_abs_diff_eq!(short / long, 16.9 / 26.9, epsilon = 1e-12);
    }

    #[test]
    fn zero_width_particle_is_undefined() {
        let r = boxed(100.0, 100.0);
        let image = ImageSize::new(320, 240);
        let target = TargetGeometry::default();
        assert_eq!(normalized_width(&r, image), Some(0.0));
        assert!(estimate_distance(&r, image, 49.4, TargetSide::Long, &target).is_none());
        assert_eq!(
            try_estimate_distance(&r, image, 49.4, TargetSide::Long, &target),
            Err(VisionError::DegenerateGeometry(
                "particle width is zero".to_owned()
            ))
        );
    }

    #[test]
    fn zero_width_image_is_undefined() {
        let r = boxed(80.0, 240.0);
        let image = ImageSize::new(0, 240);
        assert!(normalized_width(&r, image).is_none());
        assert!(
            estimate_distance(&r, image, 49.4, TargetSide::Long, &TargetGeometry::default())
                .is_none()
        );
    }

    #[test]
    fn bad_view_angle_is_undefined() {
        let r = boxed(80.0, 240.0);
        let image = ImageSize::new(320, 240);
        let target = TargetGeometry::default();
        for angle in [0.0, -10.0, 360.0, f64::NAN] {
            assert!(estimate_distance(&r, image, angle, TargetSide::Long, &target).is_none());
        }
    }

    #[test]
    fn report_distance_publishes_width() {
        let r = boxed(80.0, 240.0);
        let image = ImageSize::new(320, 240);
        let mut sink = RecordingTelemetry::default();
        let d = report_distance(
            &r,
            image,
            TargetSide::Long,
            &VisionConfig::default(),
            &mut sink,
        )
        .expect("distance");
        assert_eq!(sink.get(WIDTH_KEY), Some(1.0));
        assert!(d > 0.0);
    }

    #[test]
    fn color_selection_does_not_change_distance() {
        let r = boxed(60.0, 200.0);
        let image = ImageSize::new(320, 240);
        let base = VisionConfig::default();
        let recolored = base.with_color(
            HsvRange::new(10, 30),
            HsvRange::new(0, 255),
            HsvRange::new(200, 255),
        );
        let mut sink = RecordingTelemetry::default();
        let a = report_distance(&r, image, TargetSide::Short, &base, &mut sink);
        let b = report_distance(&r, image, TargetSide::Short, &recolored, &mut sink);
        assert_eq!(a, b);
    }
}
