//! Integration tests for loading and resolving TOML blueprints.

use std::path::Path;

use pretty_assertions::assert_eq;

use anchor_layout::{resolve, Blueprint, BlueprintError, BoundingBox};

#[test]
fn test_demo_blueprint_report() {
    let blueprint = Blueprint::from_file(Path::new("demos/anchors.toml"))
        .expect("demo blueprint should parse");
    let scene = blueprint.build().expect("demo blueprint should build");
    assert_eq!(scene.anchors().len(), 3);

    insta::assert_snapshot!(scene.report().to_string().trim_end(), @r###"
    r      rectangle  x=200 y=100 width=100 height=150
    n      region     x=130 y=100 width=70 height=150
    label  text       x=200 y=84 width=100 height=16
    panel  region     x=10 y=10 width=250 height=200
    body   rectangle  x=0 y=0 width=250 height=200
    "###);
}

#[test]
fn test_resolve_matches_scene_report() {
    let source = std::fs::read_to_string("demos/anchors.toml").expect("demo should exist");
    let report = resolve(&source).expect("demo should resolve");
    let body = report.row("body").expect("body row");
    assert_eq!(body.kind, "rectangle");
    assert_eq!(body.bounds, BoundingBox::new(0.0, 0.0, 250.0, 200.0));
}

#[test]
fn test_release_anchors_freezes_geometry() {
    let source = std::fs::read_to_string("demos/anchors.toml").expect("demo should exist");
    let mut scene = Blueprint::from_str(&source)
        .and_then(|b| b.build())
        .expect("demo should build");
    scene.release_anchors();
    assert!(scene.anchors().is_empty());

    let r = scene.geometry("r").expect("r exists");
    r.set_x(0.0);
    let n = scene.geometry("n").expect("n exists");
    assert_eq!(n.x(), 130.0);
}

#[test]
fn test_every_shape_kind_parses() {
    let source = r#"
[[node]]
id = "c"
kind = "circle"
center_x = 10
center_y = 10
radius = 5

[[node]]
id = "e"
kind = "ellipse"
center_x = 10
center_y = 10
radius_x = 5
radius_y = 3

[[node]]
id = "a"
kind = "arc"
center_x = 0
center_y = 0
radius_x = 4
radius_y = 4
length = 90

[[node]]
id = "l"
kind = "line"
start = [0, 0]
end = [10, 5]

[[node]]
id = "p"
kind = "polygon"
points = [[0, 0], [4, 0], [2, 3]]

[[anchor]]
node = "e"
reference = "c"
edge = "left"
to = "right"
"#;
    let report = resolve(source).expect("should resolve");
    let kinds: Vec<&str> = report.rows.iter().map(|row| row.kind).collect();
    assert_eq!(kinds, ["circle", "ellipse", "arc", "line", "polygon"]);
    assert_eq!(
        report.row("e").map(|row| row.bounds),
        Some(BoundingBox::new(15.0, 5.0, 10.0, 10.0))
    );
    assert_eq!(
        report.row("p").map(|row| row.bounds),
        Some(BoundingBox::new(0.0, 0.0, 4.0, 3.0))
    );
}

#[test]
fn test_unknown_kind_is_parse_error() {
    let source = "[[node]]\nid = \"x\"\nkind = \"hexagon\"\n";
    let err = resolve(source).unwrap_err();
    assert!(matches!(err, BlueprintError::Parse(_)), "{err}");
}

#[test]
fn test_unknown_update_target() {
    let source = "[[node]]\nid = \"box\"\nkind = \"region\"\nwidth = 1\nheight = 1\n\n[[update]]\nnode = \"bx\"\nproperty = \"x\"\nvalue = 1\n";
    let err = resolve(source).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown node 'bx' in update (did you mean box?)"
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Blueprint::from_file(Path::new("demos/does-not-exist.toml")).unwrap_err();
    assert!(matches!(err, BlueprintError::Io(_)));
}
