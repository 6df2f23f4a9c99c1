//! Stroke set transforms
//!
//! Pure functions over stroke sets. Each returns a new set; inputs are never
//! modified. The pipeline applies them in a fixed order: rotate, then
//! justify, then query the extent.

use nalgebra::{Rotation2, Vector2};
use stencilcut_core::{BoundingExtent, Point, Stroke};

/// Rotate every point counterclockwise by `theta_degrees` about the origin.
///
/// A zero angle returns the input unchanged, bit for bit.
pub fn rotate(strokes: &[Stroke], theta_degrees: f64) -> Vec<Stroke> {
    if theta_degrees == 0.0 {
        return strokes.to_vec();
    }

    let rotation = Rotation2::new(theta_degrees.to_radians());
    strokes
        .iter()
        .map(|stroke| {
            stroke.map_points(|p| {
                let v = rotation * Vector2::new(p.x, p.y);
                Point::new(v.x, v.y)
            })
        })
        .collect()
}

/// Translate the drawing so its bounding box starts at the origin.
pub fn justify(strokes: &[Stroke]) -> Vec<Stroke> {
    let Some(extent) = BoundingExtent::of(strokes) else {
        return Vec::new();
    };

    strokes
        .iter()
        .map(|stroke| stroke.map_points(|p| Point::new(p.x - extent.min_x, p.y - extent.min_y)))
        .collect()
}

/// Upper corner of the bounding box; `(0, 0)` for an empty drawing.
///
/// After [`justify`] this is also the drawing's width and height.
pub fn max_extent(strokes: &[Stroke]) -> (f64, f64) {
    BoundingExtent::of(strokes)
        .map(|e| (e.max_x, e.max_y))
        .unwrap_or((0.0, 0.0))
}
