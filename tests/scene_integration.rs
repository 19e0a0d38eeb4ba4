//! Integration tests for scene loading and batch routing

use ortho_route::routing::polyline::{is_axis_aligned, touches_any};
use ortho_route::{route_scene, Point, RouteStatus, Scene, SceneError};
use pretty_assertions::assert_eq;

const DIAGRAM: &str = r#"
[router]
grid_size = 10

[[nodes]]
id = "a"
x = 0
y = 0
width = 40
height = 40

[[nodes]]
id = "b"
x = 300
y = 0
width = 40
height = 40

[[nodes]]
id = "wall"
x = 150
y = -40
width = 40
height = 120

[[connections]]
id = "around"
from = "a"
to = "b"

[[connections]]
id = "loop"
from = "a"
to = "a"

[[connections]]
id = "manual"
from = "a"
to = "b"
points = [[100, 20], [100, 150], [320, 150]]
to_side = "bottom"

[[connections]]
id = "direct"
from = "b"
to = "wall"
kind = "straight"
"#;

#[test]
fn test_connections_keep_declaration_order() {
    let routed = route_scene(DIAGRAM).unwrap();
    let ids: Vec<&str> = routed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["around", "loop", "manual", "direct"]);
}

#[test]
fn test_auto_route_avoids_other_nodes() {
    let scene = Scene::from_str(DIAGRAM).unwrap();
    let routed = scene.route_all().unwrap();
    let around = &routed[0].descriptor;

    // "manual" shares the endpoints but has explicit points, so no lanes
    assert_eq!(around.status, RouteStatus::Found);
    assert_eq!(around.points[0], Point::new(40.0, 20.0));
    assert_eq!(*around.points.last().unwrap(), Point::new(300.0, 20.0));
    assert!(is_axis_aligned(&around.points));

    let wall = scene.nodes[2].bounds.inflate(scene.config.margin());
    assert!(!touches_any(&around.points, &[wall]));
}

#[test]
fn test_explicit_points_are_not_offset() {
    let routed = route_scene(DIAGRAM).unwrap();
    assert_eq!(
        routed[2].descriptor.points,
        vec![
            Point::new(40.0, 20.0),
            Point::new(100.0, 20.0),
            Point::new(100.0, 150.0),
            Point::new(320.0, 150.0),
            Point::new(320.0, 40.0),
        ]
    );
    insta::assert_snapshot!(
        routed[2].descriptor.d,
        @"M40.00 20.00 L100.00 20.00 L100.00 150.00 L320.00 150.00 L320.00 40.00"
    );
    assert_eq!(routed[2].descriptor.end_tangent, (0.0, -1.0));
}

#[test]
fn test_self_loop_leaves_right_and_enters_top() {
    let routed = route_scene(DIAGRAM).unwrap();
    let lp = &routed[1].descriptor;
    assert_eq!(lp.points[0], Point::new(40.0, 20.0));
    assert_eq!(*lp.points.last().unwrap(), Point::new(20.0, 0.0));
    assert_eq!(lp.end_tangent, (0.0, 1.0));
    assert!(is_axis_aligned(&lp.points));
}

#[test]
fn test_straight_connection() {
    let routed = route_scene(DIAGRAM).unwrap();
    let direct = &routed[3].descriptor;
    assert_eq!(direct.points, vec![Point::new(300.0, 20.0), Point::new(190.0, 20.0)]);
    assert_eq!(direct.midpoint, Point::new(245.0, 20.0));
}

#[test]
fn test_unknown_node_is_reported() {
    let toml = DIAGRAM.replace("to = \"wall\"", "to = \"ghost\"");
    match route_scene(&toml) {
        Err(SceneError::UnknownNode { connection, node }) => {
            assert_eq!(connection, "direct");
            assert_eq!(node, "ghost");
        }
        other => panic!("expected unknown node error, got {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let err = Scene::from_file(std::path::Path::new("does/not/exist.toml")).unwrap_err();
    assert!(matches!(err, SceneError::IoError(_)));
}
