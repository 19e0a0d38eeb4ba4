//! Parallel-edge lane offsetting
//!
//! Connections sharing the same unordered endpoint pair are spread into
//! lanes perpendicular to the line joining the two node centers.

use std::collections::BTreeMap;

use super::config::DEFAULT_LANE_SPACING;
use super::polyline::touches_any;
use super::types::{NodeGeometry, Point, Rect};

/// A routed connection as seen by the lane offsetter
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRenderItem {
    pub id: String,
    pub source: NodeGeometry,
    pub target: NodeGeometry,
    pub points: Vec<Point>,
}

impl ConnectionRenderItem {
    fn is_self_loop(&self) -> bool {
        self.source.key == self.target.key
    }

    /// Order-independent grouping key
    fn pair_key(&self) -> (&str, &str) {
        let a = self.source.key.as_str();
        let b = self.target.key.as_str();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Node centers in canonical (key-sorted) order
    fn canonical_centers(&self) -> (Point, Point) {
        let s = self.source.bounds.center();
        let t = self.target.bounds.center();
        if self.source.key <= self.target.key {
            (s, t)
        } else {
            (t, s)
        }
    }
}

/// Spreads parallel connections apart, declining any offset that would
/// touch a node other than the connection's own endpoints.
#[derive(Debug, Clone)]
pub struct LaneOffsetter<'a> {
    nodes: &'a [NodeGeometry],
    margin: f64,
    spacing: f64,
}

impl<'a> LaneOffsetter<'a> {
    pub fn new(nodes: &'a [NodeGeometry], margin: f64) -> Self {
        Self {
            nodes,
            margin,
            spacing: DEFAULT_LANE_SPACING,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Offset polylines, returned in the same order as `items`
    pub fn apply(&self, items: &[ConnectionRenderItem]) -> Vec<Vec<Point>> {
        let mut result: Vec<Vec<Point>> = items.iter().map(|item| item.points.clone()).collect();

        let mut groups: BTreeMap<(&str, &str), Vec<usize>> = BTreeMap::new();
        for (index, item) in items.iter().enumerate() {
            if !item.is_self_loop() {
                groups.entry(item.pair_key()).or_default().push(index);
            }
        }

        for members in groups.values_mut() {
            if members.len() < 2 {
                continue;
            }
            members.sort_by(|&a, &b| items[a].id.cmp(&items[b].id).then(a.cmp(&b)));

            let n = members.len() as f64;
            for (lane, &index) in members.iter().enumerate() {
                let offset = (lane as f64 - (n - 1.0) / 2.0) * self.spacing;
                if let Some(points) = self.offset_item(&items[index], offset) {
                    result[index] = points;
                }
            }
        }

        result
    }

    /// The translated (and possibly nudged) polyline, or `None` when the
    /// offset is zero, undefined, or unsafe.
    fn offset_item(&self, item: &ConnectionRenderItem, offset: f64) -> Option<Vec<Point>> {
        if offset == 0.0 {
            return None;
        }
        let (a, b) = item.canonical_centers();
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = dx.hypot(dy);
        if len < 1e-9 {
            return None;
        }
        let (tx, ty) = (-dy / len * offset, dx / len * offset);

        let translated: Vec<Point> = item.points.iter().map(|p| p.offset(tx, ty)).collect();

        let obstacles: Vec<Rect> = self
            .nodes
            .iter()
            .filter(|n| n.key != item.source.key && n.key != item.target.key)
            .map(|n| n.bounds.inflate(self.margin))
            .collect();

        if !touches_any(&translated, &obstacles) {
            return Some(translated);
        }

        let nudged = self.nudge_middle(&translated, &obstacles)?;
        if touches_any(&nudged, &obstacles) {
            crate::log::debug!(id = %item.id, "lane offset declined");
            None
        } else {
            Some(nudged)
        }
    }

    /// Shift the middle segment of an orthogonal polyline clear of the first
    /// obstacle it touches. Only segments strictly between the first and the
    /// last are moved, so the endpoints stay put.
    fn nudge_middle(&self, points: &[Point], obstacles: &[Rect]) -> Option<Vec<Point>> {
        let segments = points.len().checked_sub(1)?;
        if segments < 3 {
            return None;
        }
        let mid = segments / 2;
        let (a, b) = (points[mid], points[mid + 1]);
        let hit = obstacles.iter().find(|r| r.touches_segment(a, b))?;
        let gap = self.spacing / 2.0;

        let mut nudged = points.to_vec();
        if a.y == b.y {
            let y = if a.y < hit.center().y {
                hit.y - gap
            } else {
                hit.bottom() + gap
            };
            nudged[mid].y = y;
            nudged[mid + 1].y = y;
        } else if a.x == b.x {
            let x = if a.x < hit.center().x {
                hit.x - gap
            } else {
                hit.right() + gap
            };
            nudged[mid].x = x;
            nudged[mid + 1].x = x;
        } else {
            return None;
        }
        Some(nudged)
    }
}

/// Convenience wrapper using the default lane spacing
pub fn offset_parallel_edges(
    items: &[ConnectionRenderItem],
    nodes: &[NodeGeometry],
    margin: f64,
) -> Vec<Vec<Point>> {
    LaneOffsetter::new(nodes, margin).apply(items)
}
