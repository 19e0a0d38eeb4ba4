//! Ortho Route - orthogonal connection routing for diagrams
//!
//! This library computes right-angle polylines between nodes, avoiding the
//! other nodes as obstacles, and derives what a renderer needs to draw them:
//! an SVG path string, the end tangent and a label midpoint.
//!
//! # Example
//!
//! ```rust
//! use ortho_route::{route_points, Point, RouterConfig};
//!
//! let config = RouterConfig::new().with_grid_size(5.0);
//! let path = route_points(
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     None,
//!     None,
//!     &[],
//!     &config,
//! )
//! .unwrap();
//! assert_eq!(path.d, "M0.00 0.00 L0.00 10.00 L10.00 10.00");
//! ```

mod log;
pub mod path;
pub mod routing;
pub mod scene;

pub use path::{build_path, route_points, ConnectionRoute, PathDescriptor, RouteKind};
pub use routing::{
    route, AnchorHints, Axis, Direction, NodeGeometry, Point, Rect, RouteCache, RouteError,
    RouteOptions, RouteResult, RouteStatus, RouterConfig, Side,
};
pub use scene::{RoutedConnection, Scene, SceneError};

/// Parse a TOML scene and route all of its connections
pub fn route_scene(source: &str) -> Result<Vec<RoutedConnection>, SceneError> {
    Scene::from_str(source)?.route_all()
}
