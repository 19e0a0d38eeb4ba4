//! Scene files: a set of nodes and connections routed in one batch
//!
//! A scene is a TOML document with an optional `[router]` table, one
//! `[[nodes]]` entry per node rectangle and one `[[connections]]` entry per
//! connection. Every node is an obstacle for every connection; a
//! connection's own nodes are entered only at its anchors.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::path::{route_polyline, ConnectionRoute, PathDescriptor, RouteKind};
use crate::routing::{
    AnchorHints, Axis, ConnectionRenderItem, LaneOffsetter, NodeGeometry, Point, Rect,
    RouteError, RouterConfig, Side,
};

/// Errors that can occur when loading or routing a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("connection '{connection}' references unknown node '{node}'")]
    UnknownNode { connection: String, node: String },
    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String),
    #[error("routing failed: {0}")]
    Route(#[from] RouteError),
}

impl SceneError {
    pub fn unknown_node(connection: impl Into<String>, node: impl Into<String>) -> Self {
        Self::UnknownNode {
            connection: connection.into(),
            node: node.into(),
        }
    }
}

/// A connection as declared in a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConnection {
    pub id: String,
    pub from: String,
    pub to: String,
    pub route: ConnectionRoute,
}

/// Nodes, connections and router settings
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub config: RouterConfig,
    pub nodes: Vec<NodeGeometry>,
    pub connections: Vec<SceneConnection>,
}

/// A routed connection, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedConnection {
    pub id: String,
    pub descriptor: PathDescriptor,
}

/// TOML structure for deserializing scenes
#[derive(Deserialize)]
struct TomlScene {
    #[serde(default)]
    router: RouterConfig,
    #[serde(default)]
    nodes: Vec<TomlNode>,
    #[serde(default)]
    connections: Vec<TomlConnection>,
}

#[derive(Deserialize)]
struct TomlNode {
    id: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct TomlConnection {
    id: String,
    from: String,
    to: String,
    #[serde(default)]
    kind: RouteKind,
    points: Option<Vec<[f64; 2]>>,
    from_side: Option<Side>,
    to_side: Option<Side>,
    start_axis: Option<Axis>,
    end_axis: Option<Axis>,
}

impl From<TomlConnection> for SceneConnection {
    fn from(c: TomlConnection) -> Self {
        let route = ConnectionRoute {
            kind: c.kind,
            points: c
                .points
                .map(|pts| pts.into_iter().map(|[x, y]| Point::new(x, y)).collect()),
            hints: AnchorHints {
                source_side: c.from_side,
                target_side: c.to_side,
                prefer_start_axis: c.start_axis,
                prefer_end_axis: c.end_axis,
            },
        };
        SceneConnection {
            id: c.id,
            from: c.from,
            to: c.to,
            route,
        }
    }
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;

        let mut nodes: Vec<NodeGeometry> = Vec::with_capacity(parsed.nodes.len());
        for n in parsed.nodes {
            if nodes.iter().any(|existing| existing.key == n.id) {
                return Err(SceneError::DuplicateNode(n.id));
            }
            nodes.push(NodeGeometry::new(n.id, Rect::new(n.x, n.y, n.width, n.height)));
        }

        Ok(Scene {
            config: parsed.router,
            nodes,
            connections: parsed.connections.into_iter().map(Into::into).collect(),
        })
    }

    /// Override the grid size from the file
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.config.grid_size = grid_size;
        self
    }

    /// Route every connection, then separate parallel auto-routed ones
    pub fn route_all(&self) -> Result<Vec<RoutedConnection>, SceneError> {
        let index: HashMap<&str, &NodeGeometry> =
            self.nodes.iter().map(|n| (n.key.as_str(), n)).collect();

        let mut routed = Vec::with_capacity(self.connections.len());
        let mut lane_items = Vec::new();
        let mut lane_slots = Vec::new();

        for connection in &self.connections {
            let lookup = |key: &str| {
                index
                    .get(key)
                    .copied()
                    .ok_or_else(|| SceneError::unknown_node(&connection.id, key))
            };
            let source = lookup(&connection.from)?;
            let target = lookup(&connection.to)?;

            // The builder adds source and target itself
            let obstacles: Vec<Rect> = self
                .nodes
                .iter()
                .filter(|n| n.key != source.key && n.key != target.key)
                .map(|n| n.bounds)
                .collect();

            let result =
                route_polyline(source, target, &connection.route, &obstacles, &self.config)?;
            crate::log::debug!(
                id = %connection.id,
                points = result.points.len(),
                status = ?result.status,
                "connection routed"
            );

            if connection.route.is_auto() {
                lane_slots.push(routed.len());
                lane_items.push(ConnectionRenderItem {
                    id: connection.id.clone(),
                    source: source.clone(),
                    target: target.clone(),
                    points: result.points.clone(),
                });
            }
            routed.push((connection.id.clone(), result));
        }

        let offsetter = LaneOffsetter::new(&self.nodes, self.config.margin())
            .with_spacing(self.config.lane_spacing);
        for (slot, points) in lane_slots.into_iter().zip(offsetter.apply(&lane_items)) {
            routed[slot].1.points = points;
        }

        Ok(routed
            .into_iter()
            .map(|(id, result)| RoutedConnection {
                id,
                descriptor: PathDescriptor::describe(result.points, result.status),
            })
            .collect())
    }
}
