//! Polygon drawing validation
//!
//! While a zone outline is placed corner by corner, every prospective corner
//! is checked so that the outline stays simple (non self-intersecting).
//! Clicking the first corner again, once at least three corners exist,
//! closes the outline instead of being treated as a crossing.

use crate::segment::{point_on_segment, segment_intersection};
use crate::vector::Vec2;

/// Which validation is applied to a prospective corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolygonCheck {
    /// Re-validate the whole open polyline including the candidate
    #[default]
    WholePath,
    /// Only test the new final edge against the fixed existing path
    LastEdge,
}

/// Outcome of checking a prospective corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CornerCheck {
    /// The candidate extends the outline
    Accept,
    /// The candidate is the first corner and closes the outline
    Close,
    /// The candidate makes the outline cross itself at the given point
    Reject(Vec2),
}

impl CornerCheck {
    /// Whether the click should be taken (extend or close)
    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self, CornerCheck::Reject(_))
    }
}

/// First self-intersection of the polyline through `points`.
///
/// Every pair of non-adjacent segments is tested with a bounded
/// intersection. If none cross, the last point is additionally tested
/// against the segment before the last one, which catches an outline
/// folding back onto itself. Fewer than three points never intersect.
///
/// When the last point returns to the first one (four or more points),
/// the closing segment meeting the first segment at that shared corner
/// is not a crossing. Any other contact still is.
pub fn self_intersection(points: &[Vec2]) -> Option<Vec2> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let start = points[0];
    let closing = n >= 4 && points[n - 1].approx_eq(start);

    for i in 0..n - 1 {
        for j in (i + 2)..(n - 1) {
            match segment_intersection(points[i], points[i + 1], points[j], points[j + 1]) {
                Some(hit) if closing && i == 0 && j == n - 2 && hit.approx_eq(start) => {}
                Some(hit) => return Some(hit),
                None => {}
            }
        }
    }

    let last = points[n - 1];
    if point_on_segment(last, points[n - 3], points[n - 2]) {
        Some(last)
    } else {
        None
    }
}

/// First crossing between the new edge `path.last()..candidate` and the
/// existing path, skipping the existing segment adjacent to the new edge.
///
/// A candidate on the first corner closes the outline, so the new edge
/// touching the first segment at that corner does not count.
pub fn last_edge_intersection(path: &[Vec2], candidate: Vec2) -> Option<Vec2> {
    let n = path.len();
    if n < 3 {
        return None;
    }
    let start = path[0];
    let closing = candidate.approx_eq(start);
    let from = path[n - 1];
    (0..n - 2).find_map(|i| match segment_intersection(path[i], path[i + 1], from, candidate) {
        Some(hit) if closing && i == 0 && hit.approx_eq(start) => None,
        hit => hit,
    })
}

/// Classify a prospective corner for an outline made of `corners`.
pub fn check_corner(corners: &[Vec2], candidate: Vec2, mode: PolygonCheck) -> CornerCheck {
    let Some(&start) = corners.first() else {
        return CornerCheck::Accept;
    };
    let closes = candidate.approx_eq(start);

    let hit = match mode {
        PolygonCheck::WholePath => {
            let mut path = corners.to_vec();
            path.push(candidate);
            self_intersection(&path)
        }
        PolygonCheck::LastEdge => last_edge_intersection(corners, candidate),
    };

    match hit {
        Some(point) => CornerCheck::Reject(point),
        None if closes && corners.len() >= 3 => CornerCheck::Close,
        None if closes => CornerCheck::Reject(start),
        None => CornerCheck::Accept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Vec2> {
        raw.iter().map(|&p| Vec2::from(p)).collect()
    }

    #[test]
    fn test_short_paths_never_intersect() {
        assert_eq!(self_intersection(&[]), None);
        assert_eq!(self_intersection(&pts(&[(0.0, 0.0), (5.0, 5.0)])), None);
    }

    #[test]
    fn test_square_closes() {
        let mut corners = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let candidate = Vec2::new(0.0, 10.0);
        assert_eq!(check_corner(&corners, candidate, PolygonCheck::WholePath), CornerCheck::Accept);

        corners.push(candidate);
        let closing = Vec2::new(0.0, 0.0);
        assert_eq!(check_corner(&corners, closing, PolygonCheck::WholePath), CornerCheck::Close);
        assert_eq!(check_corner(&corners, closing, PolygonCheck::LastEdge), CornerCheck::Close);
    }

    #[test]
    fn test_bowtie_rejected() {
        let mut corners = pts(&[(0.0, 0.0), (10.0, 10.0)]);
        let candidate = Vec2::new(10.0, 0.0);
        assert_eq!(check_corner(&corners, candidate, PolygonCheck::WholePath), CornerCheck::Accept);

        corners.push(candidate);
        let crossing = Vec2::new(0.0, 10.0);
        assert_eq!(
            check_corner(&corners, crossing, PolygonCheck::WholePath),
            CornerCheck::Reject(Vec2::new(5.0, 5.0))
        );
        assert_eq!(
            check_corner(&corners, crossing, PolygonCheck::LastEdge),
            CornerCheck::Reject(Vec2::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_closing_needs_three_corners() {
        let corners = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let check = check_corner(&corners, Vec2::ZERO, PolygonCheck::WholePath);
        assert_eq!(check, CornerCheck::Reject(Vec2::ZERO));

        let single = pts(&[(3.0, 3.0)]);
        assert!(!check_corner(&single, Vec2::new(3.0, 3.0), PolygonCheck::WholePath).is_valid());
    }

    #[test]
    fn test_fold_back_is_rejected() {
        let corners = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let check = check_corner(&corners, Vec2::new(5.0, 0.0), PolygonCheck::WholePath);
        assert_eq!(check, CornerCheck::Reject(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_duplicate_corner_is_rejected() {
        let corners = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert!(!check_corner(&corners, Vec2::new(10.0, 10.0), PolygonCheck::WholePath).is_valid());
    }

    #[test]
    fn test_first_corner_always_accepted() {
        assert_eq!(check_corner(&[], Vec2::new(1.0, 2.0), PolygonCheck::WholePath), CornerCheck::Accept);
    }

    #[test]
    fn test_closing_edge_crossing_is_rejected() {
        let corners = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 5.0)]);
        let crossing = Vec2::new(10.0, 2.5);
        assert_eq!(
            check_corner(&corners, Vec2::ZERO, PolygonCheck::WholePath),
            CornerCheck::Reject(crossing)
        );
        assert_eq!(
            check_corner(&corners, Vec2::ZERO, PolygonCheck::LastEdge),
            CornerCheck::Reject(crossing)
        );
    }

    #[test]
    fn test_closed_square_is_simple() {
        let closed = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        assert_eq!(self_intersection(&closed), None);
        assert_eq!(last_edge_intersection(&closed[..4], Vec2::ZERO), None);
    }

    #[test]
    fn test_last_edge_ignores_adjacent_segment() {
        let path = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(last_edge_intersection(&path, Vec2::new(5.0, 10.0)), None);
        assert_eq!(
            last_edge_intersection(&path, Vec2::new(5.0, -10.0)),
            Some(Vec2::new(7.5, 0.0))
        );
    }
}
