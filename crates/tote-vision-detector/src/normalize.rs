/// Convert a ratio whose ideal value is 1 into a score in `[0, 100]`.
///
/// Piecewise linear through (0, 0), (1, 100) and (2, 0); zero everywhere
/// outside `[0, 2]`. NaN maps to 0.
#[inline]
pub fn ratio_to_score(ratio: f64) -> f64 {
    let score = 100.0 * (1.0 - (1.0 - ratio).abs());
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
