//! SVG path `d` strings for routed polylines

use crate::routing::Point;

/// A segment in a resolved path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
}

/// A polyline as a sequence of path commands
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// `MoveTo` the first point, then `LineTo` each of the rest
    pub fn from_points(points: &[Point]) -> Self {
        let segments = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if i == 0 {
                    PathSegment::MoveTo(p)
                } else {
                    PathSegment::LineTo(p)
                }
            })
            .collect();
        Self { segments }
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{} {}", coord(p.x), coord(p.y)));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!(" L{} {}", coord(p.x), coord(p.y)));
                }
            }
        }
        d
    }
}

/// Two decimals, without a sign on values that round to zero
fn coord(value: f64) -> String {
    let s = format!("{:.2}", value);
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// Path string for a polyline
pub fn path_string(points: &[Point]) -> String {
    ResolvedPath::from_points(points).to_svg_d()
}
