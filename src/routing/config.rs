//! Configuration for the routing engine

use serde::Deserialize;

use super::error::RouteError;
use super::types::{Direction, Point, Rect};

/// Default extra cost charged for each change of direction
pub const DEFAULT_BEND_PENALTY: f64 = 5.0;

/// Default cap on search-node expansions
pub const DEFAULT_MAX_EXPANSIONS: usize = 50_000;

/// Default perpendicular spacing between parallel connections
pub const DEFAULT_LANE_SPACING: f64 = 14.0;

/// Routing settings shared by every connection in a view
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Grid spacing used by the search
    pub grid_size: f64,

    /// Extra cost for each bend
    pub bend_penalty: f64,

    /// Clearance added around obstacles; half the grid size when unset
    pub obstacle_margin: Option<f64>,

    /// Maximum number of search-node expansions before falling back
    pub max_expansions: usize,

    /// Spacing between parallel connections sharing both endpoints
    pub lane_spacing: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            bend_penalty: DEFAULT_BEND_PENALTY,
            obstacle_margin: None,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            lane_spacing: DEFAULT_LANE_SPACING,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid spacing
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the bend penalty
    pub fn with_bend_penalty(mut self, penalty: f64) -> Self {
        self.bend_penalty = penalty;
        self
    }

    /// Set an explicit obstacle margin
    pub fn with_obstacle_margin(mut self, margin: f64) -> Self {
        self.obstacle_margin = Some(margin);
        self
    }

    /// Set the expansion cap
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = max;
        self
    }

    /// Set the parallel lane spacing
    pub fn with_lane_spacing(mut self, spacing: f64) -> Self {
        self.lane_spacing = spacing;
        self
    }

    /// Effective obstacle margin
    pub fn margin(&self) -> f64 {
        self.obstacle_margin.unwrap_or(self.grid_size / 2.0)
    }

    /// Length of the protective stub kept at each end by the shortcut pass
    pub fn stub_length(&self) -> f64 {
        self.margin() + self.grid_size / 2.0
    }

    /// Route options for one connection using these settings
    pub fn options(&self, start: Point, end: Point) -> RouteOptions {
        let mut options = RouteOptions::new(start, end, self.grid_size)
            .with_bend_penalty(self.bend_penalty)
            .with_max_expansions(self.max_expansions);
        options.obstacle_margin = self.obstacle_margin;
        options
    }
}

/// Input to a single routing request
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOptions {
    pub start: Point,
    pub end: Point,
    pub grid_size: f64,
    pub obstacles: Vec<Rect>,
    /// Defaults to `grid_size / 2` when unset
    pub obstacle_margin: Option<f64>,
    /// Derived from the endpoints and obstacles when unset
    pub bounds: Option<Rect>,
    pub bend_penalty: f64,
    /// Required direction of the first move
    pub start_dir: Option<Direction>,
    /// Required direction of travel when arriving at the end
    pub end_dir: Option<Direction>,
    pub max_expansions: usize,
}

impl RouteOptions {
    pub fn new(start: Point, end: Point, grid_size: f64) -> Self {
        Self {
            start,
            end,
            grid_size,
            obstacles: Vec::new(),
            obstacle_margin: None,
            bounds: None,
            bend_penalty: DEFAULT_BEND_PENALTY,
            start_dir: None,
            end_dir: None,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Rect>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_obstacle_margin(mut self, margin: f64) -> Self {
        self.obstacle_margin = Some(margin);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_bend_penalty(mut self, penalty: f64) -> Self {
        self.bend_penalty = penalty;
        self
    }

    pub fn with_start_dir(mut self, dir: Option<Direction>) -> Self {
        self.start_dir = dir;
        self
    }

    pub fn with_end_dir(mut self, dir: Option<Direction>) -> Self {
        self.end_dir = dir;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = max;
        self
    }

    /// Effective obstacle margin
    pub fn margin(&self) -> f64 {
        self.obstacle_margin.unwrap_or(self.grid_size / 2.0)
    }

    /// Obstacles grown by the effective margin
    pub fn inflated_obstacles(&self) -> Vec<Rect> {
        let margin = self.margin();
        self.obstacles.iter().map(|o| o.inflate(margin)).collect()
    }

    /// Check the caller's contract before any search is attempted
    pub fn validate(&self) -> Result<(), RouteError> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(RouteError::InvalidGridSize(self.grid_size));
        }
        if !self.start.is_finite() {
            return Err(RouteError::NonFiniteEndpoint {
                which: "start",
                x: self.start.x,
                y: self.start.y,
            });
        }
        if !self.end.is_finite() {
            return Err(RouteError::NonFiniteEndpoint {
                which: "end",
                x: self.end.x,
                y: self.end.y,
            });
        }
        if let Some(margin) = self.obstacle_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(RouteError::invalid_option(
                    "obstacle_margin",
                    format!("must be finite and non-negative, got {}", margin),
                ));
            }
        }
        if !self.bend_penalty.is_finite() || self.bend_penalty < 0.0 {
            return Err(RouteError::invalid_option(
                "bend_penalty",
                format!("must be finite and non-negative, got {}", self.bend_penalty),
            ));
        }
        if self.max_expansions == 0 {
            return Err(RouteError::invalid_option(
                "max_expansions",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
