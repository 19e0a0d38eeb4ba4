//! Polyline helpers shared by the router and the post-passes

use super::types::{Direction, Point, Rect};

/// Drop repeated points and interior points whose incoming and outgoing
/// segments lie on the same axis.
pub fn simplify(points: &[Point]) -> Vec<Point> {
    let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if deduped.last() != Some(&p) {
            deduped.push(p);
        }
    }
    if deduped.len() <= 2 {
        return deduped;
    }

    let mut result: Vec<Point> = vec![deduped[0]];
    for i in 1..deduped.len() - 1 {
        let prev = result[result.len() - 1];
        let cur = deduped[i];
        let next = deduped[i + 1];
        let horizontal = prev.y == cur.y && cur.y == next.y;
        let vertical = prev.x == cur.x && cur.x == next.x;
        if !(horizontal || vertical) {
            result.push(cur);
        }
    }
    result.push(deduped[deduped.len() - 1]);
    result
}

/// Every consecutive pair differs in exactly one coordinate
pub fn is_axis_aligned(points: &[Point]) -> bool {
    points
        .windows(2)
        .all(|w| (w[0].x == w[1].x) != (w[0].y == w[1].y))
}

/// Whether any segment touches any of the (already inflated) rectangles
pub fn touches_any(points: &[Point], obstacles: &[Rect]) -> bool {
    points
        .windows(2)
        .any(|w| obstacles.iter().any(|r| r.touches_segment(w[0], w[1])))
}

/// Whether the polyline doubles back on itself anywhere
pub fn has_reversal(points: &[Point]) -> bool {
    points.windows(3).any(|w| {
        match (
            Direction::between(w[0], w[1]),
            Direction::between(w[1], w[2]),
        ) {
            (Some(a), Some(b)) => a.opposite() == b,
            _ => false,
        }
    })
}

/// Sum of Euclidean segment lengths
pub fn length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

/// Number of direction changes
pub fn bend_count(points: &[Point]) -> usize {
    simplify(points).len().saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_simplify_collinear_and_duplicates() {
        let input = pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 5.0), (0.0, 10.0), (5.0, 10.0)]);
        assert_eq!(simplify(&input), pts(&[(0.0, 0.0), (0.0, 10.0), (5.0, 10.0)]));
    }

    #[test]
    fn test_simplify_drops_reversal_vertex() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 0.0)]);
        assert_eq!(simplify(&input), pts(&[(0.0, 0.0), (5.0, 0.0)]));
    }

    #[test]
    fn test_is_axis_aligned() {
        assert!(is_axis_aligned(&pts(&[(0.0, 0.0), (0.0, 5.0), (3.0, 5.0)])));
        assert!(!is_axis_aligned(&pts(&[(0.0, 0.0), (1.0, 5.0)])));
        assert!(!is_axis_aligned(&pts(&[(0.0, 0.0), (0.0, 0.0)])));
    }

    #[test]
    fn test_has_reversal() {
        assert!(has_reversal(&pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 0.0)])));
        assert!(!has_reversal(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0)])));
    }

    #[test]
    fn test_length_and_bends() {
        let route = pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
        assert_eq!(length(&route), 20.0);
        assert_eq!(bend_count(&route), 1);
    }
}
