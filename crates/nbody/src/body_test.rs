use nalgebra::{Point2, Vector2};

use crate::body::{Body, SystemPath};

#[test]
fn test_new() {
    let path = SystemPath::root().child("solar").child("moon");
    let body = Body::new(3.0, [10.0, 0.0], [0.0, 2.0], 0.25, "moon", path.clone());

    assert_eq!(body.mass, 3.0);
    assert_eq!(body.translation, Point2::new(10.0, 0.0));
    assert_eq!(body.velocity, Vector2::new(0.0, 2.0));
    assert_eq!(body.rotation, 0.25);
    assert_eq!(body.source_template, "moon");
    assert_eq!(body.source_system_path, path);
}

#[test]
fn test_display() {
    let body = Body::new(
        100.0,
        [1.5, -2.0],
        [0.0, 0.5],
        0.1,
        "sun",
        SystemPath::root(),
    );

    assert_eq!(body.to_string(), "M(100) P(1.5, -2) V(0, 0.5) R(0.1)");
}

#[test]
fn test_system_path_child_is_persistent() {
    let parent = SystemPath::root().child("solar");
    let child = parent.child("planets");

    assert_eq!(parent.to_string(), "solar");
    assert_eq!(child.to_string(), "solar/planets");
    assert_eq!(child.segments(), ["solar", "planets"]);
    assert!(SystemPath::root().is_root());
    assert!(!child.is_root());
}

#[test]
fn test_serializes_camel_case() {
    let path: SystemPath = ["solar", "sun"].into_iter().collect();
    let body = Body::new(100.0, [0.0, 0.0], [0.0, 0.0], 0.0, "sun", path);

    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["sourceTemplate"], "sun");
    assert_eq!(json["sourceSystemPath"], serde_json::json!(["solar", "sun"]));
    assert_eq!(json["translation"], serde_json::json!([0.0, 0.0]));

    let back: Body = serde_json::from_value(json).unwrap();
    assert_eq!(back, body);
}
