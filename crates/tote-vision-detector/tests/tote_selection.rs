use approx::assert_abs_diff_eq;
use tote_vision_core::{
    BoundingRect, HsvRange, ImageSize, ParticleReport, TargetSide, VisionConfig,
};
use tote_vision_detector::{
    estimate_distance, ratio_to_score, rank_candidates, score_particle, select_target,
};

fn particle(percent: f64, fill: f64, rect: BoundingRect) -> ParticleReport {
    let hull = rect.area() * 0.954;
    ParticleReport {
        percent_area_to_image_area: percent,
        area: hull * fill,
        convex_hull_area: hull,
        bounding_rect: rect,
    }
}

/// A frame as the segmentation step might report it: the tote's long face,
/// a bright reflection strip, a speck under the area floor and a ragged
/// blob larger than the tote.
fn scene() -> Vec<ParticleReport> {
    vec![
        particle(1.2, 1.0, BoundingRect::new(300.0, 10.0, 310.0, 20.0)),
        particle(9.5, 1.0, BoundingRect::new(60.0, 90.0, 255.0, 177.8)),
        particle(3.0, 0.9, BoundingRect::new(10.0, 200.0, 200.0, 210.0)),
        particle(25.0, 0.3, BoundingRect::new(0.0, 0.0, 120.0, 230.0)),
    ]
}

#[test]
fn picks_tote_face_in_cluttered_scene() {
    let config = VisionConfig::default();
    let reports = scene();

    let ranked = rank_candidates(&reports, &config);
    let order: Vec<usize> = ranked.iter().map(|c| c.index).collect();
    assert_eq!(order, vec![3, 1, 2]);

    let tote = select_target(&reports, &config).expect("tote");
    assert_eq!(tote.index, 1);
    assert_eq!(tote.scores.side(), TargetSide::Long);
    assert!(tote.composite >= config.scoring.score_minimum);
}

#[test]
fn distance_for_selected_tote() {
    let config = VisionConfig::default();
    let reports = scene();
    let tote = select_target(&reports, &config).expect("tote");

    let image = ImageSize::new(320, 240);
    let feet = estimate_distance(
        &tote.report,
        image,
        config.camera.view_angle_deg,
        tote.scores.side(),
        &config.target,
    )
    .expect("distance");

    let width = 2.0 * 195.0 / 320.0;
    let expected = 26.9 / (width * 12.0 * (49.4_f64 / 2.0).to_radians().tan());
    assert_abs_diff_eq!(feet, expected, epsilon = 1e-9);
}

#[test]
fn raising_the_floor_empties_the_frame() {
    let mut config = VisionConfig::default();
    config.scoring.score_minimum = 95.0;
    assert!(select_target(&scene(), &config).is_none());
}

#[test]
fn recoloring_leaves_scores_untouched() {
    let base = VisionConfig::default();
    let recolored = base.with_color(
        HsvRange::new(24, 49),
        HsvRange::new(67, 255),
        HsvRange::new(88, 255),
    );
    for r in scene() {
        assert_eq!(score_particle(&r, &base), score_particle(&r, &recolored));
    }
    assert_eq!(
        select_target(&scene(), &base),
        select_target(&scene(), &recolored)
    );
}

#[test]
fn normalizer_shape() {
    let mut prev = ratio_to_score(0.0);
    for step in 1..=100 {
        let r = step as f64 / 100.0;
        let s = ratio_to_score(r);
        assert!(s >= prev);
        assert_abs_diff_eq!(s, ratio_to_score(2.0 - r), epsilon = 1e-9);
        prev = s;
    }
    assert_eq!(prev, 100.0);
}
