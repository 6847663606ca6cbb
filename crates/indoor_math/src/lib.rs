//! # indoor_math - Planar Geometry
//!
//! Pure functions and value types used by the map model and the drawing
//! tools. Floor plans live in a single 2D plane measured in scene units, so
//! everything here is `f64` and two-dimensional.

pub mod vector;
pub mod segment;
pub mod polygon;
pub mod grid;

pub use vector::*;
pub use segment::*;
pub use polygon::*;
pub use grid::*;

/// Common math constants
pub mod consts {
    /// Tolerance for "point lies on segment" and point coincidence tests
    pub const EPSILON: f64 = 1e-6;
}

pub mod prelude {
    pub use crate::vector::Vec2;
    pub use crate::segment::{
        point_on_segment, point_segment_distance, segment_intersection,
    };
    pub use crate::polygon::{
        check_corner, last_edge_intersection, self_intersection, CornerCheck, PolygonCheck,
    };
    pub use crate::grid::snap_to_grid;
}
