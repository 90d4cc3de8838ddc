//! Planar geometry helpers
//!
//! Polygons are plain slices of `DVec2` forming a closed loop (the last
//! vertex connects back to the first).

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used for degenerate-geometry checks, in map units
pub const EPSILON: f64 = 1e-9;

/// Axis-aligned map rectangle anchored at the origin
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Extent along x
    pub width: f64,
    /// Extent along y
    pub height: f64,
}

impl Bounds {
    /// Create bounds covering `[0, width] x [0, height]`
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Clamp a point into the rectangle
    #[inline]
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        DVec2::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Corners in counter-clockwise order (y up)
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(0.0, 0.0),
            DVec2::new(self.width, 0.0),
            DVec2::new(self.width, self.height),
            DVec2::new(0.0, self.height),
        ]
    }
}

/// Signed polygon area (positive for counter-clockwise loops)
pub fn signed_area(polygon: &[DVec2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        twice_area += a.perp_dot(b);
    }
    twice_area * 0.5
}

/// Unsigned polygon area
#[inline]
pub fn polygon_area(polygon: &[DVec2]) -> f64 {
    signed_area(polygon).abs()
}

/// Area-weighted centroid, `None` for degenerate polygons
pub fn polygon_centroid(polygon: &[DVec2]) -> Option<DVec2> {
    let area = signed_area(polygon);
    if area.abs() < EPSILON {
        return None;
    }

    let mut sum = DVec2::ZERO;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        sum += (*a + b) * a.perp_dot(b);
    }
    Some(sum / (6.0 * area))
}

/// Even-odd point-in-polygon test
///
/// Works for any simple polygon regardless of winding.
pub fn polygon_contains(polygon: &[DVec2], point: DVec2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
