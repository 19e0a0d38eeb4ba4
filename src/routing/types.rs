//! Core geometric types for the routing engine

use serde::Deserialize;

/// A 2D point in model coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point translated by (dx, dy)
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing both points
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Rect::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Closed containment: points on the boundary count as inside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Compute the union of two rectangles (smallest rectangle containing both)
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Expand this rectangle to include a point
    pub fn expand_to_include(&self, point: Point) -> Rect {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Whether the segment `a`-`b` touches this rectangle, boundary included.
    ///
    /// Liang-Barsky clipping; works for diagonal segments as well as
    /// axis-aligned ones.
    pub fn touches_segment(&self, a: Point, b: Point) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let p = [-dx, dx, -dy, dy];
        let q = [
            a.x - self.x,
            self.right() - a.x,
            a.y - self.y,
            self.bottom() - a.y,
        ];

        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (pi, qi) in p.iter().zip(q.iter()) {
            if *pi == 0.0 {
                if *qi < 0.0 {
                    return false;
                }
            } else {
                let r = qi / pi;
                if *pi < 0.0 {
                    if r > t1 {
                        return false;
                    }
                    t0 = t0.max(r);
                } else {
                    if r < t0 {
                        return false;
                    }
                    t1 = t1.min(r);
                }
            }
        }
        t0 <= t1
    }
}

/// Cardinal travel direction on the routing grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Order in which the router tries moves. Vertical moves come first, so
    /// among equal-cost routes the one leaving vertically wins.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit grid step (y grows downward)
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Vertical,
            Direction::East | Direction::West => Axis::Horizontal,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Direction of an axis-aligned, non-degenerate segment
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        if from.x == to.x && from.y != to.y {
            Some(if to.y > from.y {
                Direction::South
            } else {
                Direction::North
            })
        } else if from.y == to.y && from.x != to.x {
            Some(if to.x > from.x {
                Direction::East
            } else {
                Direction::West
            })
        } else {
            None
        }
    }
}

/// Horizontal or vertical axis preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Axis {
    #[serde(rename = "h", alias = "horizontal")]
    Horizontal,
    #[serde(rename = "v", alias = "vertical")]
    Vertical,
}

impl Axis {
    /// Travel direction along this axis from `from` toward `to`.
    ///
    /// Ties (no displacement along the axis) resolve to East / South.
    pub fn toward(self, from: Point, to: Point) -> Direction {
        match self {
            Axis::Horizontal if to.x < from.x => Direction::West,
            Axis::Horizontal => Direction::East,
            Axis::Vertical if to.y < from.y => Direction::North,
            Axis::Vertical => Direction::South,
        }
    }
}

/// Side of a node rectangle a connection attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Direction pointing away from the node through this side
    pub fn outward(self) -> Direction {
        match self {
            Side::Top => Direction::North,
            Side::Bottom => Direction::South,
            Side::Left => Direction::West,
            Side::Right => Direction::East,
        }
    }

    /// Direction of travel when entering the node through this side
    pub fn inward(self) -> Direction {
        self.outward().opposite()
    }
}

/// Integer cell coordinate on the routing grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir`
    pub fn step(self, dir: Direction) -> GridPoint {
        let (dx, dy) = dir.delta();
        GridPoint::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance in cells
    pub fn manhattan(self, other: GridPoint) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// A node's identity and geometry as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGeometry {
    pub key: String,
    pub bounds: Rect,
}

impl NodeGeometry {
    pub fn new(key: impl Into<String>, bounds: Rect) -> Self {
        Self {
            key: key.into(),
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_contains_is_closed() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(10.5, 5.0)));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 10.0, 20.0, 30.0).inflate(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 40.0));
    }

    #[test]
    fn test_union_and_expand() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 30.0, 15.0));
        assert_eq!(
            a.expand_to_include(Point::new(-5.0, 20.0)),
            Rect::new(-5.0, 0.0, 15.0, 20.0)
        );
    }

    #[test]
    fn test_touches_segment_axis_aligned() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.touches_segment(Point::new(0.0, 15.0), Point::new(30.0, 15.0)));
        assert!(r.touches_segment(Point::new(0.0, 10.0), Point::new(30.0, 10.0)));
        assert!(!r.touches_segment(Point::new(0.0, 9.0), Point::new(30.0, 9.0)));
        assert!(!r.touches_segment(Point::new(0.0, 15.0), Point::new(9.0, 15.0)));
        assert!(r.touches_segment(Point::new(15.0, 12.0), Point::new(15.0, 14.0)));
    }

    #[test]
    fn test_touches_segment_diagonal() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.touches_segment(Point::new(0.0, 0.0), Point::new(30.0, 30.0)));
        assert!(!r.touches_segment(Point::new(0.0, 10.0), Point::new(8.0, 30.0)));
    }

    #[test]
    fn test_direction_between() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(Direction::between(o, Point::new(0.0, 5.0)), Some(Direction::South));
        assert_eq!(Direction::between(o, Point::new(-3.0, 0.0)), Some(Direction::West));
        assert_eq!(Direction::between(o, Point::new(1.0, 1.0)), None);
        assert_eq!(Direction::between(o, o), None);
    }

    #[test]
    fn test_axis_toward() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(-10.0, 10.0);
        assert_eq!(Axis::Horizontal.toward(a, b), Direction::West);
        assert_eq!(Axis::Vertical.toward(a, b), Direction::South);
        assert_eq!(Axis::Horizontal.toward(a, a), Direction::East);
    }

    #[test]
    fn test_side_directions() {
        assert_eq!(Side::Right.outward(), Direction::East);
        assert_eq!(Side::Left.inward(), Direction::East);
        assert_eq!(Side::Top.inward(), Direction::South);
        assert_eq!(Side::Bottom.outward(), Direction::South);
    }
}
