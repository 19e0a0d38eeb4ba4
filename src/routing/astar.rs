//! Direction-aware A* search over the routing grid
//!
//! The search graph's nodes are (cell, incoming direction) pairs, because the
//! cost of the next move depends on whether it turns. Ties in the open set
//! are broken by a total order (f, then g, then insertion sequence), so
//! identical options always produce identical routes.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::config::RouteOptions;
use super::error::RouteError;
use super::grid::{snap, to_model, SearchGrid};
use super::polyline::{simplify, touches_any};
use super::types::{Axis, Direction, GridPoint, Point, Rect};

/// How a route was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    /// The search reached the goal
    Found,
    /// No path existed or the expansion cap was hit; a one-bend route was
    /// synthesized from the endpoints instead
    Fallback,
}

impl RouteStatus {
    pub fn is_fallback(self) -> bool {
        self == RouteStatus::Fallback
    }
}

/// A routed polyline
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub points: Vec<Point>,
    pub status: RouteStatus,
}

impl RouteResult {
    pub fn is_fallback(&self) -> bool {
        self.status.is_fallback()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SearchState {
    cell: GridPoint,
    dir: Option<Direction>,
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f64,
    g: f64,
    seq: u64,
    state: SearchState,
}

// BinaryHeap is a max-heap: "greater" means "pop first".
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

enum SearchOutcome {
    Found(Vec<GridPoint>),
    NoPath,
    CapReached,
}

/// Route an orthogonal polyline from `options.start` to `options.end`.
///
/// Fails only when the options violate their preconditions. An infeasible
/// or too expensive search yields a [`RouteStatus::Fallback`] route.
pub fn route(options: &RouteOptions) -> Result<RouteResult, RouteError> {
    options.validate()?;

    let grid = SearchGrid::new(options);
    if grid.start() == grid.goal() {
        // Both endpoints fall in one cell; nothing to search
        return Ok(RouteResult {
            points: direct_route(options.start, options.end, options.start_dir, options.end_dir),
            status: RouteStatus::Found,
        });
    }

    match search(&grid, options) {
        SearchOutcome::Found(cells) => {
            let points = reconstruct(&cells, options);
            crate::log::debug!(
                cells = cells.len(),
                points = points.len(),
                "orthogonal route found"
            );
            Ok(RouteResult {
                points,
                status: RouteStatus::Found,
            })
        }
        SearchOutcome::NoPath => {
            crate::log::warn!(
                start = ?options.start,
                end = ?options.end,
                "no orthogonal route exists, using fallback"
            );
            Ok(fallback(options))
        }
        SearchOutcome::CapReached => {
            crate::log::warn!(
                max_expansions = options.max_expansions,
                "expansion cap reached, using fallback"
            );
            Ok(fallback(options))
        }
    }
}

/// The two-segment route used when the search gives up
pub fn fallback(options: &RouteOptions) -> RouteResult {
    RouteResult {
        points: direct_route(options.start, options.end, options.start_dir, options.end_dir),
        status: RouteStatus::Fallback,
    }
}

/// At most one bend between the exact endpoints, honouring a start direction
/// first and an end direction second. Without either the route leaves
/// vertically.
fn direct_route(
    start: Point,
    end: Point,
    start_dir: Option<Direction>,
    end_dir: Option<Direction>,
) -> Vec<Point> {
    if start.x == end.x || start.y == end.y {
        return simplify(&[start, end]);
    }
    let horizontal_first = match (start_dir, end_dir) {
        (Some(dir), _) => dir.axis() == Axis::Horizontal,
        (None, Some(dir)) => dir.axis() == Axis::Vertical,
        (None, None) => false,
    };
    let corner = if horizontal_first {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    };
    vec![start, corner, end]
}

fn search(grid: &SearchGrid, options: &RouteOptions) -> SearchOutcome {
    let goal = grid.goal();
    let heuristic = |cell: GridPoint| cell.manhattan(goal) as f64;

    let start = SearchState {
        cell: grid.start(),
        dir: None,
    };

    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<SearchState, f64> = HashMap::new();
    let mut parent: HashMap<SearchState, SearchState> = HashMap::new();
    let mut seq: u64 = 0;

    open.push(OpenNode {
        f: heuristic(start.cell),
        g: 0.0,
        seq,
        state: start,
    });
    best_g.insert(start, 0.0);

    let mut best_goal: Option<(SearchState, f64)> = None;
    let mut expansions: usize = 0;

    while let Some(&node) = open.peek() {
        if let Some((_, goal_g)) = best_goal {
            if node.f >= goal_g {
                break;
            }
        }
        open.pop();

        let state = node.state;
        if best_g.get(&state).map_or(false, |&g| node.g > g) {
            continue; // stale entry
        }

        if state.cell == goal && options.end_dir.map_or(true, |d| state.dir == Some(d)) {
            if best_goal.map_or(true, |(_, g)| node.g < g) {
                best_goal = Some((state, node.g));
            }
            continue;
        }

        if expansions >= options.max_expansions {
            return SearchOutcome::CapReached;
        }
        expansions += 1;

        for dir in Direction::SEARCH_ORDER {
            if state.dir.is_none() && options.start_dir.map_or(false, |d| d != dir) {
                continue;
            }
            // No doubling back over the cell just left
            if state.dir == Some(dir.opposite()) {
                continue;
            }
            let next_cell = state.cell.step(dir);
            if !grid.is_open(next_cell) {
                continue;
            }

            let turns = state.dir.map_or(false, |d| d != dir);
            let g = node.g + 1.0 + if turns { options.bend_penalty } else { 0.0 };
            let next = SearchState {
                cell: next_cell,
                dir: Some(dir),
            };

            if best_g.get(&next).map_or(true, |&old| g < old) {
                best_g.insert(next, g);
                parent.insert(next, state);
                seq += 1;
                open.push(OpenNode {
                    f: g + heuristic(next_cell),
                    g,
                    seq,
                    state: next,
                });
            }
        }
    }

    crate::log::debug!(
        expansions,
        pushed = seq,
        cells = grid.cell_count(),
        "search finished"
    );

    match best_goal {
        Some((state, _)) => {
            let mut cells = vec![state.cell];
            let mut current = state;
            while let Some(&prev) = parent.get(&current) {
                cells.push(prev.cell);
                current = prev;
            }
            cells.reverse();
            SearchOutcome::Found(cells)
        }
        None => SearchOutcome::NoPath,
    }
}

/// Grid cells to a simplified model polyline pinned to the exact endpoints.
///
/// Pinning slides the end segments off the grid lines the search checked.
/// When that makes them touch an obstacle the grid path is kept as is and
/// joined to the exact endpoints by short jogs instead.
fn reconstruct(cells: &[GridPoint], options: &RouteOptions) -> Vec<Point> {
    let grid_size = options.grid_size;
    let snapped: Vec<Point> = cells.iter().map(|&c| to_model(c, grid_size)).collect();
    let snapped = simplify(&snapped);
    let pinned = pin_endpoints(&snapped, options.start, options.end, grid_size);

    // Obstacles holding an endpoint are entered by any route
    let guarded: Vec<Rect> = options
        .inflated_obstacles()
        .into_iter()
        .filter(|r| !r.contains(options.start) && !r.contains(options.end))
        .collect();
    if snapped.len() < 2 || !touches_any(&pinned, &guarded) {
        return pinned;
    }

    crate::log::debug!(
        start = ?options.start,
        end = ?options.end,
        "pinned endpoints touch an obstacle, jogging to the grid"
    );
    jog_endpoints(&snapped, options.start, options.end)
}

/// Connect the exact endpoints to an unmodified grid path with at most one
/// corner each.
fn jog_endpoints(snapped: &[Point], start: Point, end: Point) -> Vec<Point> {
    let n = snapped.len();
    let (first, second) = (snapped[0], snapped[1]);
    let (last, before_last) = (snapped[n - 1], snapped[n - 2]);

    // Join along the axis the grid path continues on, so the corner merges
    let head = if first.x == second.x {
        Point::new(first.x, start.y)
    } else {
        Point::new(start.x, first.y)
    };
    let tail = if last.x == before_last.x {
        Point::new(last.x, end.y)
    } else {
        Point::new(end.x, last.y)
    };

    let mut points = Vec::with_capacity(n + 4);
    points.push(start);
    points.push(head);
    points.extend_from_slice(snapped);
    points.push(tail);
    points.push(end);
    simplify(&points)
}

/// Replace the first and last grid points with the exact endpoints and
/// shift their neighbours so every segment stays axis-aligned.
fn pin_endpoints(snapped: &[Point], start: Point, end: Point, grid_size: f64) -> Vec<Point> {
    let n = snapped.len();
    if n < 2 {
        return direct_route(start, end, None, None);
    }

    if n == 2 {
        let vertical = snapped[0].x == snapped[1].x;
        if vertical && start.x != end.x {
            let mid_y = snap((start.y + end.y) / 2.0, grid_size) as f64 * grid_size;
            return simplify(&[
                start,
                Point::new(start.x, mid_y),
                Point::new(end.x, mid_y),
                end,
            ]);
        }
        if !vertical && start.y != end.y {
            let mid_x = snap((start.x + end.x) / 2.0, grid_size) as f64 * grid_size;
            return simplify(&[
                start,
                Point::new(mid_x, start.y),
                Point::new(mid_x, end.y),
                end,
            ]);
        }
        return vec![start, end];
    }

    let mut points = snapped.to_vec();
    if snapped[0].x == snapped[1].x {
        points[1].x = start.x;
    } else {
        points[1].y = start.y;
    }
    if snapped[n - 2].x == snapped[n - 1].x {
        points[n - 2].x = end.x;
    } else {
        points[n - 2].y = end.y;
    }
    points[0] = start;
    points[n - 1] = end;
    simplify(&points)
}
