//! Path descriptors: the routed polyline plus what a renderer needs to draw
//! and label it.

pub mod builder;
pub mod measure;
pub mod svg;

pub use builder::{build_path, route_points, route_polyline, ConnectionRoute, RouteKind};
pub use measure::{distance_to_polyline, end_tangent, hit_test, midpoint};
pub use svg::{path_string, PathSegment, ResolvedPath};

use crate::routing::{Point, RouteStatus};

/// Final geometry of one connection
#[derive(Debug, Clone, PartialEq)]
pub struct PathDescriptor {
    pub points: Vec<Point>,
    /// SVG path string, two decimals per coordinate
    pub d: String,
    /// Unit direction at the target end, for arrowheads
    pub end_tangent: (f64, f64),
    /// Arclength midpoint, for labels
    pub midpoint: Point,
    pub status: RouteStatus,
}

impl PathDescriptor {
    /// Derive the descriptor for a finished polyline
    pub fn describe(points: Vec<Point>, status: RouteStatus) -> Self {
        Self {
            d: path_string(&points),
            end_tangent: end_tangent(&points),
            midpoint: midpoint(&points),
            points,
            status,
        }
    }

    /// Whether a screen-space click lands on this path
    pub fn hit_test(&self, p: Point, pixel_threshold: f64, zoom: f64) -> bool {
        hit_test(&self.points, p, pixel_threshold, zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_l_route() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        let desc = PathDescriptor::describe(points, RouteStatus::Found);
        assert_eq!(desc.d, "M0.00 0.00 L0.00 10.00 L10.00 10.00");
        assert_eq!(desc.end_tangent, (1.0, 0.0));
        assert_eq!(desc.midpoint, Point::new(0.0, 10.0));
        assert!(desc.hit_test(Point::new(1.0, 5.0), 2.0, 1.0));
    }
}
