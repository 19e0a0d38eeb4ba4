//! Routing grid: snapping, search bounds, and the blocked-cell rule

use super::config::RouteOptions;
use super::types::{Direction, GridPoint, Point, Rect};

/// Padding, in grid cells, added around derived search bounds
pub const BOUNDS_PADDING_CELLS: f64 = 10.0;

/// Snap a model coordinate to the nearest grid index.
///
/// Exact halves round away from zero: `snap(2.5, 1.0) == 3` and
/// `snap(-2.5, 1.0) == -3`.
pub fn snap(value: f64, grid_size: f64) -> i64 {
    (value / grid_size).round() as i64
}

pub fn snap_point(point: Point, grid_size: f64) -> GridPoint {
    GridPoint::new(snap(point.x, grid_size), snap(point.y, grid_size))
}

/// Model coordinates of a grid cell
pub fn to_model(cell: GridPoint, grid_size: f64) -> Point {
    Point::new(cell.x as f64 * grid_size, cell.y as f64 * grid_size)
}

/// Bounding box of the endpoints and inflated obstacles, padded by ten cells
pub fn default_bounds(start: Point, end: Point, inflated: &[Rect], grid_size: f64) -> Rect {
    let mut bounds = Rect::from_corners(start, end);
    for obstacle in inflated {
        bounds = bounds.union(obstacle);
    }
    bounds.inflate(BOUNDS_PADDING_CELLS * grid_size)
}

/// The discretized search space for one routing request
#[derive(Debug, Clone)]
pub struct SearchGrid {
    grid_size: f64,
    obstacles: Vec<Rect>,
    min: GridPoint,
    max: GridPoint,
    start: GridPoint,
    goal: GridPoint,
    /// Cells leading out of the obstacles that hold an endpoint
    escape: Vec<GridPoint>,
}

impl SearchGrid {
    /// Build the grid for validated options
    pub fn new(options: &RouteOptions) -> Self {
        let grid_size = options.grid_size;
        let obstacles = options.inflated_obstacles();
        let bounds = options
            .bounds
            .unwrap_or_else(|| default_bounds(options.start, options.end, &obstacles, grid_size));

        let start = snap_point(options.start, grid_size);
        let goal = snap_point(options.end, grid_size);

        let min = GridPoint::new(
            ((bounds.x / grid_size).floor() as i64).min(start.x).min(goal.x),
            ((bounds.y / grid_size).floor() as i64).min(start.y).min(goal.y),
        );
        let max = GridPoint::new(
            ((bounds.right() / grid_size).ceil() as i64).max(start.x).max(goal.x),
            ((bounds.bottom() / grid_size).ceil() as i64).max(start.y).max(goal.y),
        );

        let mut grid = Self {
            grid_size,
            obstacles,
            min,
            max,
            start,
            goal,
            escape: Vec::new(),
        };
        let mut escape = grid.escape_cells(start, options.start, options.start_dir);
        escape.extend(grid.escape_cells(
            goal,
            options.end,
            options.end_dir.map(Direction::opposite),
        ));
        grid.escape = escape;
        grid
    }

    /// Cells stepped through from `from` along `dir` while still inside an
    /// obstacle that holds `anchor` and no other. Lets a route leave the
    /// node it is attached to when the margin exceeds a cell.
    fn escape_cells(
        &self,
        from: GridPoint,
        anchor: Point,
        dir: Option<Direction>,
    ) -> Vec<GridPoint> {
        let Some(dir) = dir else {
            return Vec::new();
        };
        let (holding, others): (Vec<&Rect>, Vec<&Rect>) =
            self.obstacles.iter().partition(|r| r.contains(anchor));
        if holding.is_empty() {
            return Vec::new();
        }

        let mut cells = Vec::new();
        let mut cell = from.step(dir);
        while self.in_bounds(cell) {
            let point = to_model(cell, self.grid_size);
            let held = holding.iter().any(|r| r.contains(point));
            if !held || others.iter().any(|r| r.contains(point)) {
                break;
            }
            cells.push(cell);
            cell = cell.step(dir);
        }
        cells
    }

    pub fn start(&self) -> GridPoint {
        self.start
    }

    pub fn goal(&self) -> GridPoint {
        self.goal
    }

    pub fn in_bounds(&self, cell: GridPoint) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// A cell is blocked when its model point lies inside an inflated
    /// obstacle. The start and goal cells, and the straight escape from an
    /// obstacle holding either of them, are never blocked.
    pub fn is_blocked(&self, cell: GridPoint) -> bool {
        if cell == self.start || cell == self.goal || self.escape.contains(&cell) {
            return false;
        }
        let point = to_model(cell, self.grid_size);
        self.obstacles.iter().any(|o| o.contains(point))
    }

    /// In bounds and not blocked
    pub fn is_open(&self, cell: GridPoint) -> bool {
        self.in_bounds(cell) && !self.is_blocked(cell)
    }

    /// Number of cells inside the search bounds
    pub fn cell_count(&self) -> u64 {
        let w = (self.max.x - self.min.x + 1).max(0) as u64;
        let h = (self.max.y - self.min.y + 1).max(0) as u64;
        w.saturating_mul(h)
    }
}
