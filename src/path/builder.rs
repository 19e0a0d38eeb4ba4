//! Turns a connection between two nodes into a path descriptor.
//!
//! Straight connections join the anchors directly, orthogonal connections
//! either follow caller-supplied bend points verbatim or are routed around
//! the obstacles and then shortcut.

use serde::Deserialize;

use super::PathDescriptor;
use crate::routing::anchor::{axis_hints, resolve_anchors, AnchorHints};
use crate::routing::astar::{route, RouteResult, RouteStatus};
use crate::routing::config::RouterConfig;
use crate::routing::error::RouteError;
use crate::routing::shortcut::shortcut;
use crate::routing::types::{Axis, NodeGeometry, Point, Rect};

/// Connection routing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Straight,
    #[default]
    Orthogonal,
}

/// How one connection should be routed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectionRoute {
    pub kind: RouteKind,
    /// Explicit interior bend points; disables automatic routing
    pub points: Option<Vec<Point>>,
    pub hints: AnchorHints,
}

impl ConnectionRoute {
    pub fn straight() -> Self {
        Self {
            kind: RouteKind::Straight,
            ..Self::default()
        }
    }

    pub fn orthogonal() -> Self {
        Self::default()
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_hints(mut self, hints: AnchorHints) -> Self {
        self.hints = hints;
        self
    }

    /// Routed automatically, so subject to the post-passes
    pub fn is_auto(&self) -> bool {
        self.points.is_none() || self.kind == RouteKind::Straight
    }
}

/// Polyline for a connection between two nodes.
///
/// `obstacles` should not include the source or target: both are added
/// here, so a route never cuts through its own nodes. A self-loop (equal
/// keys) adds its node once.
pub fn route_polyline(
    source: &NodeGeometry,
    target: &NodeGeometry,
    connection: &ConnectionRoute,
    obstacles: &[Rect],
    config: &RouterConfig,
) -> Result<RouteResult, RouteError> {
    let self_loop = source.key == target.key;
    let anchors = resolve_anchors(&source.bounds, &target.bounds, self_loop, &connection.hints);

    match (connection.kind, &connection.points) {
        (RouteKind::Straight, _) => Ok(RouteResult {
            points: vec![anchors.start, anchors.end],
            status: RouteStatus::Found,
        }),
        (RouteKind::Orthogonal, Some(bends)) => {
            let mut points = Vec::with_capacity(bends.len() + 2);
            points.push(anchors.start);
            points.extend_from_slice(bends);
            points.push(anchors.end);
            Ok(RouteResult {
                points,
                status: RouteStatus::Found,
            })
        }
        (RouteKind::Orthogonal, None) => {
            let mut obstacles = obstacles.to_vec();
            match anchors.extra_obstacle {
                Some(node) => obstacles.push(node),
                None => obstacles.extend([source.bounds, target.bounds]),
            }

            let options = config
                .options(anchors.start, anchors.end)
                .with_obstacles(obstacles)
                .with_start_dir(anchors.start_dir)
                .with_end_dir(anchors.end_dir);
            Ok(shortcut_found(&options.obstacles, route(&options)?, config))
        }
    }
}

/// Route between two bare points, e.g. while a connection is being dragged
pub fn route_points(
    start: Point,
    end: Point,
    prefer_start_axis: Option<Axis>,
    prefer_end_axis: Option<Axis>,
    obstacles: &[Rect],
    config: &RouterConfig,
) -> Result<PathDescriptor, RouteError> {
    let (start_dir, end_dir) = axis_hints(start, end, prefer_start_axis, prefer_end_axis);
    let options = config
        .options(start, end)
        .with_obstacles(obstacles.to_vec())
        .with_start_dir(start_dir)
        .with_end_dir(end_dir);
    let result = shortcut_found(obstacles, route(&options)?, config);
    Ok(PathDescriptor::describe(result.points, result.status))
}

/// Shortcut a successful search; fallbacks are kept as they are
fn shortcut_found(obstacles: &[Rect], result: RouteResult, config: &RouterConfig) -> RouteResult {
    if result.status != RouteStatus::Found {
        return result;
    }
    RouteResult {
        points: shortcut(&result.points, obstacles, config.margin(), config.stub_length()),
        status: result.status,
    }
}

/// Full descriptor for a connection between two nodes
pub fn build_path(
    source: &NodeGeometry,
    target: &NodeGeometry,
    connection: &ConnectionRoute,
    obstacles: &[Rect],
    config: &RouterConfig,
) -> Result<PathDescriptor, RouteError> {
    let result = route_polyline(source, target, connection, obstacles, config)?;
    Ok(PathDescriptor::describe(result.points, result.status))
}
