//! Point and segment queries
//!
//! Provides the finite-segment primitives used by polygon validation:
//! - Point to segment distance
//! - Point-on-segment test (distance sum, absolute tolerance)
//! - Bounded segment/segment intersection

use crate::consts::EPSILON;
use crate::vector::Vec2;

/// Shortest distance from `point` to the finite segment `start..end`
pub fn point_segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f64 {
    let dir = end - start;
    let len_sq = dir.length_squared();
    if len_sq == 0.0 {
        return point.distance(start);
    }
    let t = ((point - start).dot(dir) / len_sq).clamp(0.0, 1.0);
    point.distance(start + dir * t)
}

/// Whether `point` lies on the finite segment `start..end`.
///
/// Uses the distance-sum test: `|p - a| + |p - b| == |b - a|` within
/// [`EPSILON`] scene units.
pub fn point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> bool {
    let to_start = point.distance(start);
    let to_end = point.distance(end);
    let length = start.distance(end);
    ((to_start + to_end) - length).abs() < EPSILON
}

/// Bounded intersection of two finite segments
///
/// Returns the intersection point when both segments cross or touch,
/// endpoints included. Parallel and collinear segments never intersect.
///
/// # Arguments
/// * `a0`, `a1` - First segment
/// * `b0`, `b1` - Second segment
pub fn segment_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);

    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    let qp = b0 - a0;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a0 + r * t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_point_segment_distance() {
        let a = v(0.0, 0.0);
        let b = v(10.0, 0.0);
        assert_eq!(point_segment_distance(v(5.0, 3.0), a, b), 3.0);
        assert_eq!(point_segment_distance(v(-3.0, 4.0), a, b), 5.0);
        assert_eq!(point_segment_distance(v(13.0, 4.0), a, b), 5.0);
        assert_eq!(point_segment_distance(v(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_point_on_segment() {
        let a = v(0.0, 0.0);
        let b = v(10.0, 10.0);
        assert!(point_on_segment(v(5.0, 5.0), a, b));
        assert!(point_on_segment(a, a, b));
        assert!(point_on_segment(b, a, b));
        assert!(!point_on_segment(v(5.0, 5.1), a, b));
        assert!(!point_on_segment(v(11.0, 11.0), a, b));
    }

    #[test]
    fn test_crossing_segments() {
        let hit = segment_intersection(v(0.0, 0.0), v(10.0, 10.0), v(10.0, 0.0), v(0.0, 10.0));
        assert_eq!(hit, Some(v(5.0, 5.0)));
    }

    #[test]
    fn test_touching_endpoints_count() {
        let hit = segment_intersection(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0), v(0.0, 0.0));
        assert_eq!(hit, Some(v(0.0, 0.0)));
    }

    #[test]
    fn test_disjoint_and_parallel() {
        assert!(segment_intersection(v(0.0, 0.0), v(1.0, 1.0), v(3.0, 0.0), v(2.0, 1.0)).is_none());
        assert!(segment_intersection(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 5.0), v(10.0, 5.0)).is_none());
        assert!(segment_intersection(v(0.0, 0.0), v(10.0, 0.0), v(5.0, 0.0), v(15.0, 0.0)).is_none());
    }
}
