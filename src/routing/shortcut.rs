//! Staircase shortcutting: remove bends from a routed polyline without
//! touching any inflated obstacle.

use super::polyline::{has_reversal, is_axis_aligned, simplify};
use super::types::{Direction, Point, Rect};

/// Post-pass that greedily replaces runs of vertices with a straight or
/// single-corner connector.
#[derive(Debug, Clone)]
pub struct ShortcutOptimizer {
    obstacles: Vec<Rect>,
    stub_length: f64,
}

impl ShortcutOptimizer {
    /// `obstacles` are uninflated; they are grown by `margin` here.
    pub fn new(obstacles: &[Rect], margin: f64, stub_length: f64) -> Self {
        Self {
            obstacles: obstacles.iter().map(|o| o.inflate(margin)).collect(),
            stub_length: stub_length.max(0.0),
        }
    }

    /// Simplify `points`, keeping both endpoints and a stub at each end.
    ///
    /// Input that is not axis-aligned is returned unchanged.
    pub fn optimize(&self, points: &[Point]) -> Vec<Point> {
        if !is_axis_aligned(points) {
            return points.to_vec();
        }

        let mut current = simplify(points);
        loop {
            if current.len() < 4 {
                return current;
            }
            let candidate = simplify(&self.pass(&self.with_stubs(&current)));
            if candidate.len() < current.len() {
                current = candidate;
            } else {
                return current;
            }
        }
    }

    /// Split the first and last segments so a stub of `stub_length` stays
    /// attached to each endpoint.
    fn with_stubs(&self, points: &[Point]) -> Vec<Point> {
        let mut pts = points.to_vec();

        let head = stub_point(pts[0], pts[1], self.stub_length);
        if head != pts[1] && head != pts[0] {
            pts.insert(1, head);
        }

        let n = pts.len();
        let tail = stub_point(pts[n - 1], pts[n - 2], self.stub_length);
        if tail != pts[n - 2] && tail != pts[n - 1] {
            pts.insert(n - 1, tail);
        }
        pts
    }

    /// One greedy sweep between the two stubs
    fn pass(&self, pts: &[Point]) -> Vec<Point> {
        let last = pts.len() - 2;
        let mut out = vec![pts[0], pts[1]];
        let mut i = 1;

        while i < last {
            let mut advanced = false;
            for j in (i + 2..=last).rev() {
                let removed = j - i - 1;
                if let Some(corner) = self.connector(pts, &out, i, j, removed) {
                    if let Some(c) = corner {
                        out.push(c);
                    }
                    out.push(pts[j]);
                    i = j;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                out.push(pts[i + 1]);
                i += 1;
            }
        }

        out.push(pts[last + 1]);
        out
    }

    /// A clear connector from `pts[i]` to `pts[j]` that removes more vertices
    /// than it adds. `Some(None)` is a straight connector, `Some(Some(c))` one
    /// with a corner at `c`.
    fn connector(
        &self,
        pts: &[Point],
        out: &[Point],
        i: usize,
        j: usize,
        removed: usize,
    ) -> Option<Option<Point>> {
        let a = pts[i];
        let b = pts[j];
        let before = out[out.len() - 2];
        let after = pts[j + 1];

        if a.x == b.x || a.y == b.y {
            return self
                .accepts(&[before, a, b, after])
                .then_some(None);
        }

        if removed <= 1 {
            return None;
        }
        [Point::new(b.x, a.y), Point::new(a.x, b.y)]
            .into_iter()
            .find(|&corner| self.accepts(&[before, a, corner, b, after]))
            .map(Some)
    }

    /// The interior legs must be clear and the whole window free of
    /// reversals.
    fn accepts(&self, window: &[Point]) -> bool {
        if has_reversal(window) {
            return false;
        }
        let legs = &window[1..window.len() - 1];
        !legs
            .windows(2)
            .any(|w| self.obstacles.iter().any(|r| r.touches_segment(w[0], w[1])))
    }
}

/// Point at distance `length` from `from` toward `to`, capped at `to`
fn stub_point(from: Point, to: Point, length: f64) -> Point {
    let total = from.distance_to(to);
    if length >= total {
        return to;
    }
    match Direction::between(from, to) {
        Some(Direction::North) => from.offset(0.0, -length),
        Some(Direction::South) => from.offset(0.0, length),
        Some(Direction::East) => from.offset(length, 0.0),
        Some(Direction::West) => from.offset(-length, 0.0),
        None => to,
    }
}

/// Convenience wrapper around [`ShortcutOptimizer`]
pub fn shortcut(points: &[Point], obstacles: &[Rect], margin: f64, stub_length: f64) -> Vec<Point> {
    ShortcutOptimizer::new(obstacles, margin, stub_length).optimize(points)
}
