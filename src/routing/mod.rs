//! Orthogonal connection routing
//!
//! Anchors are resolved from node rectangles, an A* search over a grid finds
//! a minimal-bend axis-aligned path around inflated obstacles, and post-passes
//! shortcut staircases and separate parallel connections.

pub mod anchor;
pub mod astar;
pub mod cache;
pub mod config;
pub mod error;
pub mod grid;
pub mod lanes;
pub mod polyline;
pub mod shortcut;
pub mod types;

pub use anchor::{resolve_anchors, AnchorHints, ResolvedAnchors};
pub use astar::{route, RouteResult, RouteStatus};
pub use cache::RouteCache;
pub use config::{RouteOptions, RouterConfig};
pub use error::RouteError;
pub use lanes::{offset_parallel_edges, ConnectionRenderItem, LaneOffsetter};
pub use shortcut::{shortcut, ShortcutOptimizer};
pub use types::*;
