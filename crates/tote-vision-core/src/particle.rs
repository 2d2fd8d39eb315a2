use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel coordinates.
///
/// Expected to satisfy `right >= left` and `bottom >= top`; widths and
/// heights are clamped at zero when that does not hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[inline]
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Width over height, or `None` for a zero-height box.
    pub fn aspect(&self) -> Option<f64> {
        let h = self.height();
        if h > 0.0 {
            Some(self.width() / h)
        } else {
            None
        }
    }
}

/// One detected blob in a single camera frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleReport {
    /// Blob area as a percentage (0..100) of the whole image area.
    pub percent_area_to_image_area: f64,
    /// Raw pixel area of the blob.
    pub area: f64,
    /// Pixel area of the blob's convex hull (`area <= convex_hull_area`).
    pub convex_hull_area: f64,
    pub bounding_rect: BoundingRect,
}

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_dimensions() {
        let r = BoundingRect::new(80.0, 10.0, 240.0, 60.0);
        assert_eq!(r.width(), 160.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.area(), 8000.0);
        assert_eq!(r.aspect(), Some(3.2));
    }

    #[test]
    fn flat_rect_has_no_aspect() {
        let r = BoundingRect::new(0.0, 5.0, 10.0, 5.0);
        assert_eq!(r.area(), 0.0);
        assert!(r.aspect().is_none());
    }

    #[test]
    fn inverted_rect_clamps_to_zero() {
        let r = BoundingRect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
    }

    #[test]
    fn report_deserializes_from_json() {
        let json = r#"{
            "percent_area_to_image_area": 12.5,
            "area": 900.0,
            "convex_hull_area": 1000.0,
            "bounding_rect": { "left": 1.0, "top": 2.0, "right": 41.0, "bottom": 32.0 }
        }"#;
        let report: ParticleReport = serde_json::from_str(json).expect("parse report");
        assert_eq!(report.bounding_rect.width(), 40.0);
        assert_eq!(report.percent_area_to_image_area, 12.5);
    }
}
