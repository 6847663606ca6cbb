//! Grid snapping

use crate::vector::Vec2;

/// Round each coordinate to the nearest multiple of `grid_size`.
///
/// A `grid_size` of zero or less disables snapping.
#[inline]
pub fn snap_to_grid(point: Vec2, grid_size: f64) -> Vec2 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return point;
    }
    Vec2::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}
