//! Anchor points and direction hints for a connection between two nodes

use super::types::{Axis, Direction, Point, Rect, Side};

/// Caller-supplied overrides for anchor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorHints {
    pub source_side: Option<Side>,
    pub target_side: Option<Side>,
    pub prefer_start_axis: Option<Axis>,
    pub prefer_end_axis: Option<Axis>,
}

/// Anchor points and router constraints for one connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAnchors {
    pub start: Point,
    pub end: Point,
    pub start_dir: Option<Direction>,
    pub end_dir: Option<Direction>,
    /// Set for self-loops: the node itself must be routed around
    pub extra_obstacle: Option<Rect>,
}

/// Midpoint of a rectangle side
pub fn attachment_point(bounds: &Rect, side: Side) -> Point {
    attachment_point_at(bounds, side, 0.5)
}

/// Point at fraction `t` along a side (left-to-right or top-to-bottom)
pub fn attachment_point_at(bounds: &Rect, side: Side, t: f64) -> Point {
    match side {
        Side::Top => Point::new(bounds.x + bounds.width * t, bounds.y),
        Side::Bottom => Point::new(bounds.x + bounds.width * t, bounds.bottom()),
        Side::Left => Point::new(bounds.x, bounds.y + bounds.height * t),
        Side::Right => Point::new(bounds.right(), bounds.y + bounds.height * t),
    }
}

/// Determine the best sides to connect two rectangles
pub fn best_sides(from: &Rect, to: &Rect) -> (Side, Side) {
    let dx = to.center().x - from.center().x;
    let dy = to.center().y - from.center().y;

    // One above the other
    let h_overlap = from.x < to.right() && from.right() > to.x;
    // Side by side
    let v_overlap = from.y < to.bottom() && from.bottom() > to.y;

    // Strongly vertical offsets connect vertically even without overlap
    let primarily_vertical = dy.abs() > dx.abs() * 1.5;

    let vertical = if (h_overlap && !v_overlap) || primarily_vertical {
        true
    } else if v_overlap && !h_overlap {
        false
    } else {
        dx.abs() <= dy.abs()
    };

    match (vertical, dx > 0.0, dy > 0.0) {
        (true, _, true) => (Side::Bottom, Side::Top),
        (true, _, false) => (Side::Top, Side::Bottom),
        (false, true, _) => (Side::Right, Side::Left),
        (false, false, _) => (Side::Left, Side::Right),
    }
}

/// Resolve anchors for a connection.
///
/// Explicit sides win over the automatic choice. Axis preferences replace
/// the side-derived directions, pointing toward the other endpoint. For a
/// self-loop the route leaves one side and re-enters another (Right then
/// Top by default) with the node added as an obstacle.
pub fn resolve_anchors(
    source: &Rect,
    target: &Rect,
    self_loop: bool,
    hints: &AnchorHints,
) -> ResolvedAnchors {
    if self_loop {
        return resolve_self_loop(source, hints);
    }

    let (auto_source, auto_target) = best_sides(source, target);
    let source_side = hints.source_side.unwrap_or(auto_source);
    let target_side = hints.target_side.unwrap_or(auto_target);

    let start = attachment_point(source, source_side);
    let end = attachment_point(target, target_side);

    let start_dir = match hints.prefer_start_axis {
        Some(axis) => axis.toward(start, end),
        None => source_side.outward(),
    };
    let end_dir = match hints.prefer_end_axis {
        Some(axis) => axis.toward(start, end),
        None => target_side.inward(),
    };

    ResolvedAnchors {
        start,
        end,
        start_dir: Some(start_dir),
        end_dir: Some(end_dir),
        extra_obstacle: None,
    }
}

fn resolve_self_loop(bounds: &Rect, hints: &AnchorHints) -> ResolvedAnchors {
    let source_side = hints.source_side.unwrap_or(Side::Right);
    let target_side = hints.target_side.unwrap_or(Side::Top);

    let (start, end) = if source_side == target_side {
        (
            attachment_point_at(bounds, source_side, 1.0 / 3.0),
            attachment_point_at(bounds, target_side, 2.0 / 3.0),
        )
    } else {
        (
            attachment_point(bounds, source_side),
            attachment_point(bounds, target_side),
        )
    };

    ResolvedAnchors {
        start,
        end,
        start_dir: Some(source_side.outward()),
        end_dir: Some(target_side.inward()),
        extra_obstacle: Some(*bounds),
    }
}

/// Resolve anchors when only axis preferences are known, e.g. for a bare
/// point-to-point request. Unset preferences leave the end unconstrained.
pub fn axis_hints(
    start: Point,
    end: Point,
    prefer_start_axis: Option<Axis>,
    prefer_end_axis: Option<Axis>,
) -> (Option<Direction>, Option<Direction>) {
    (
        prefer_start_axis.map(|axis| axis.toward(start, end)),
        prefer_end_axis.map(|axis| axis.toward(start, end)),
    )
}
