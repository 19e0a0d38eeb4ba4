//! Measurements along a polyline: tangent, arclength midpoint, hit testing

use crate::routing::Point;

pub use crate::routing::polyline::length;

/// Unit direction of the last segment with non-zero length, or `(0, 0)`
pub fn end_tangent(points: &[Point]) -> (f64, f64) {
    for w in points.windows(2).rev() {
        let dx = w[1].x - w[0].x;
        let dy = w[1].y - w[0].y;
        let len = dx.hypot(dy);
        if len > 0.0 {
            return (dx / len, dy / len);
        }
    }
    (0.0, 0.0)
}

/// The point halfway along the polyline by Euclidean arclength.
///
/// A zero-length polyline yields its first point; an empty one the origin.
pub fn midpoint(points: &[Point]) -> Point {
    let Some(&first) = points.first() else {
        return Point::new(0.0, 0.0);
    };
    let mut remaining = length(points) / 2.0;
    for w in points.windows(2) {
        let seg = w[0].distance_to(w[1]);
        if seg > 0.0 && remaining <= seg {
            let t = remaining / seg;
            return Point::new(
                w[0].x + (w[1].x - w[0].x) * t,
                w[0].y + (w[1].y - w[0].y) * t,
            );
        }
        remaining -= seg;
    }
    first
}

/// Distance from `p` to the closest point of segment `a`-`b`
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + dx * t, a.y + dy * t))
}

/// Shortest distance from `p` to any segment; infinite for an empty polyline
pub fn distance_to_polyline(points: &[Point], p: Point) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => p.distance_to(*only),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Whether `p` is within `pixel_threshold` screen pixels of the polyline
/// at the given zoom factor
pub fn hit_test(points: &[Point], p: Point, pixel_threshold: f64, zoom: f64) -> bool {
    if !(zoom > 0.0) {
        return false;
    }
    distance_to_polyline(points, p) <= pixel_threshold / zoom
}
