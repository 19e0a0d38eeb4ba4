//! Integration tests for the orthogonal router and its post-passes

use ortho_route::routing::polyline::{is_axis_aligned, touches_any};
use ortho_route::routing::shortcut::shortcut;
use ortho_route::{
    build_path, route, route_points, AnchorHints, Axis, ConnectionRoute, Direction, NodeGeometry,
    Point, Rect, RouteCache, RouteOptions, RouteStatus, RouterConfig, Side,
};
use pretty_assertions::assert_eq;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn cluttered() -> RouteOptions {
    RouteOptions::new(p(0.0, 0.0), p(200.0, 120.0), 10.0).with_obstacles(vec![
        Rect::new(30.0, -20.0, 20.0, 80.0),
        Rect::new(90.0, 40.0, 40.0, 30.0),
        Rect::new(150.0, 90.0, 20.0, 50.0),
    ])
}

#[test]
fn test_routing_is_deterministic() {
    let first = route(&cluttered()).unwrap();
    for _ in 0..5 {
        assert_eq!(route(&cluttered()).unwrap(), first);
    }
}

#[test]
fn test_route_is_safe_and_aligned() {
    let options = cluttered();
    let result = route(&options).unwrap();

    assert_eq!(result.status, RouteStatus::Found);
    assert_eq!(result.points[0], options.start);
    assert_eq!(*result.points.last().unwrap(), options.end);
    assert!(is_axis_aligned(&result.points));
    assert!(!touches_any(&result.points, &options.inflated_obstacles()));
}

#[test]
fn test_off_grid_endpoints_are_exact() {
    let options = RouteOptions::new(p(3.0, 7.0), p(48.0, 33.0), 10.0);
    let result = route(&options).unwrap();
    assert_eq!(result.points[0], p(3.0, 7.0));
    assert_eq!(*result.points.last().unwrap(), p(48.0, 33.0));
    assert!(is_axis_aligned(&result.points));
}

#[test]
fn test_aligned_endpoints_route_straight() {
    let result = route(&RouteOptions::new(p(0.0, 0.0), p(100.0, 0.0), 10.0)).unwrap();
    assert_eq!(result.points, vec![p(0.0, 0.0), p(100.0, 0.0)]);
}

#[test]
fn test_blocked_corridor_detours_horizontally() {
    let config = RouterConfig::new().with_grid_size(10.0);
    let obstacles = [Rect::new(-10.0, 40.0, 20.0, 20.0)];
    let desc = route_points(p(0.0, 0.0), p(0.0, 100.0), None, None, &obstacles, &config).unwrap();

    assert_eq!(desc.status, RouteStatus::Found);
    assert_eq!(desc.points.len(), 4);
    assert_eq!(desc.points[0], p(0.0, 0.0));
    assert_eq!(desc.points[3], p(0.0, 100.0));
    assert_eq!(desc.points[1].y, 0.0);
    assert_eq!(desc.points[1].x.abs(), 20.0);
    let inflated = [obstacles[0].inflate(config.margin())];
    assert!(!touches_any(&desc.points, &inflated));
}

#[test]
fn test_horizontal_preferences_give_three_segments() {
    let config = RouterConfig::new().with_grid_size(5.0);
    let desc = route_points(
        p(0.0, 0.0),
        p(10.0, 10.0),
        Some(Axis::Horizontal),
        Some(Axis::Horizontal),
        &[],
        &config,
    )
    .unwrap();
    assert_eq!(
        desc.points,
        vec![p(0.0, 0.0), p(5.0, 0.0), p(5.0, 10.0), p(10.0, 10.0)]
    );
}

#[test]
fn test_enclosed_goal_falls_back() {
    // A ring of obstacles around the goal
    let ring = vec![
        Rect::new(80.0, 80.0, 40.0, 5.0),
        Rect::new(80.0, 115.0, 40.0, 5.0),
        Rect::new(80.0, 80.0, 5.0, 40.0),
        Rect::new(115.0, 80.0, 5.0, 40.0),
    ];
    let options = RouteOptions::new(p(0.0, 0.0), p(100.0, 100.0), 10.0).with_obstacles(ring);
    let result = route(&options).unwrap();

    assert!(result.is_fallback());
    assert_eq!(result.points[0], p(0.0, 0.0));
    assert_eq!(*result.points.last().unwrap(), p(100.0, 100.0));
    assert!(result.points.len() <= 3);
    assert!(is_axis_aligned(&result.points));
}

#[test]
fn test_shortcut_never_adds_collisions() {
    let obstacles = [Rect::new(35.0, 5.0, 10.0, 10.0), Rect::new(0.0, 45.0, 10.0, 10.0)];
    let staircases = [
        vec![
            p(0.0, 0.0),
            p(0.0, 10.0),
            p(10.0, 10.0),
            p(10.0, 20.0),
            p(20.0, 20.0),
            p(20.0, 30.0),
        ],
        vec![
            p(0.0, 0.0),
            p(20.0, 0.0),
            p(20.0, 20.0),
            p(40.0, 20.0),
            p(40.0, 40.0),
            p(60.0, 40.0),
            p(60.0, 60.0),
        ],
        vec![
            p(60.0, 60.0),
            p(60.0, 40.0),
            p(40.0, 40.0),
            p(40.0, 20.0),
            p(20.0, 20.0),
            p(20.0, 0.0),
        ],
    ];

    for margin in [0.0, 2.0, 4.0] {
        let inflated: Vec<Rect> = obstacles.iter().map(|o| o.inflate(margin)).collect();
        for stairs in &staircases {
            if touches_any(stairs, &inflated) {
                continue;
            }
            let result = shortcut(stairs, &obstacles, margin, 5.0);
            assert_eq!(result[0], stairs[0]);
            assert_eq!(result.last(), stairs.last());
            assert!(is_axis_aligned(&result));
            assert!(result.len() <= stairs.len());
            assert!(!touches_any(&result, &inflated));
        }
    }
}

#[test]
fn test_cache_matches_direct_routing() {
    let mut cache = RouteCache::new();
    let direct = route(&cluttered()).unwrap();
    assert_eq!(cache.get_or_route(&cluttered()).unwrap(), direct);
    assert_eq!(cache.get_or_route(&cluttered()).unwrap(), direct);
    assert_eq!(cache.len(), 1);
}

fn first_and_last_directions(points: &[Point]) -> (Option<Direction>, Option<Direction>) {
    let n = points.len();
    (
        Direction::between(points[0], points[1]),
        Direction::between(points[n - 2], points[n - 1]),
    )
}

#[test]
fn test_requested_directions_appear_in_output() {
    let cases = [
        (Direction::West, Direction::West),
        (Direction::North, Direction::South),
        (Direction::South, Direction::East),
        (Direction::East, Direction::North),
    ];
    for (start_dir, end_dir) in cases {
        let options = RouteOptions::new(p(0.0, 20.0), p(240.0, 20.0), 10.0)
            .with_start_dir(Some(start_dir))
            .with_end_dir(Some(end_dir));
        let result = route(&options).unwrap();

        assert_eq!(result.status, RouteStatus::Found);
        assert_eq!(
            first_and_last_directions(&result.points),
            (Some(start_dir), Some(end_dir))
        );
        assert!(is_axis_aligned(&result.points));
    }
}

#[test]
fn test_off_grid_endpoints_stay_clear_of_thin_obstacle() {
    for x in [3.0, 4.0, -4.0] {
        let options = RouteOptions::new(p(x, 0.0), p(x, 100.0), 10.0)
            .with_obstacles(vec![Rect::new(7.0, 40.0, 2.0, 20.0)]);
        let result = route(&options).unwrap();

        assert_eq!(result.points[0], p(x, 0.0));
        assert_eq!(*result.points.last().unwrap(), p(x, 100.0));
        assert!(is_axis_aligned(&result.points));
        assert!(!touches_any(&result.points, &options.inflated_obstacles()));
    }
}

#[test]
fn test_sides_pointing_away_from_target() {
    let a = NodeGeometry::new("a", Rect::new(0.0, 0.0, 40.0, 40.0));
    let b = NodeGeometry::new("b", Rect::new(200.0, 0.0, 40.0, 40.0));
    let connection = ConnectionRoute::orthogonal().with_hints(AnchorHints {
        source_side: Some(Side::Left),
        target_side: Some(Side::Right),
        ..AnchorHints::default()
    });
    let config = RouterConfig::new().with_grid_size(10.0);
    let desc = build_path(&a, &b, &connection, &[], &config).unwrap();

    assert_eq!(desc.status, RouteStatus::Found);
    assert_eq!(desc.points[0], p(0.0, 20.0));
    assert_eq!(*desc.points.last().unwrap(), p(240.0, 20.0));
    assert_eq!(
        first_and_last_directions(&desc.points),
        (Some(Direction::West), Some(Direction::West))
    );
    let interiors = [a.bounds.inflate(-1.0), b.bounds.inflate(-1.0)];
    assert!(!touches_any(&desc.points, &interiors));
}
