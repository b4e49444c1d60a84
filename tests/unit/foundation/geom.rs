use super::*;

#[test]
fn override_applies_only_set_fields() {
    let base = ElementFrame::new(10.0, 20.0, 100.0, 50.0).with_z(3);
    let patch = FrameOverride {
        x: Some(99.0),
        ..FrameOverride::default()
    };
    let out = patch.apply_to(base);
    assert_eq!(out.x, 99.0);
    assert_eq!(out.y, 20.0);
    assert_eq!(out.width, 100.0);
    assert_eq!(out.height, 50.0);
    assert_eq!(out.z_index, 3);
}

#[test]
fn left_top_read_as_x_y() {
    let frame = ElementFrame::new(7.0, 11.0, 1.0, 1.0);
    assert_eq!(frame.left(), frame.x);
    assert_eq!(frame.top(), frame.y);
}

#[test]
fn override_accepts_left_top_aliases_on_input() {
    let parsed: FrameOverride = serde_json::from_str(r#"{"left": 100.0, "top": 50.0}"#).unwrap();
    assert_eq!(parsed.x, Some(100.0));
    assert_eq!(parsed.y, Some(50.0));
}

#[test]
fn override_serializes_camel_case_and_skips_unset() {
    let patch = FrameOverride {
        x: Some(1.0),
        z_index: Some(5),
        ..FrameOverride::default()
    };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({"x": 1.0, "zIndex": 5}));
}

#[test]
fn place_transform_without_rotation_is_translation() {
    let frame = ElementFrame::new(30.0, 40.0, 10.0, 10.0);
    let p = frame.place_transform() * kurbo::Point::new(0.0, 0.0);
    assert!((p.x - 30.0).abs() < 1e-9);
    assert!((p.y - 40.0).abs() < 1e-9);
}

#[test]
fn rotation_pivots_around_box_center() {
    // 180° rotation maps the local origin onto the opposite corner.
    let frame = ElementFrame::new(100.0, 100.0, 40.0, 20.0).with_rotation(180.0);
    let p = frame.place_transform() * kurbo::Point::new(0.0, 0.0);
    assert!((p.x - 140.0).abs() < 1e-9);
    assert!((p.y - 120.0).abs() < 1e-9);

    // The center itself is a fixed point.
    let c = frame.place_transform() * kurbo::Point::new(20.0, 10.0);
    assert!((c.x - 120.0).abs() < 1e-9);
    assert!((c.y - 110.0).abs() < 1e-9);
}

#[test]
fn containment_is_edge_inclusive() {
    let outer = ElementFrame::new(0.0, 0.0, 100.0, 100.0);
    assert!(ElementFrame::new(0.0, 0.0, 100.0, 100.0).contained_in(&outer));
    assert!(ElementFrame::new(10.0, 10.0, 20.0, 20.0).contained_in(&outer));
    assert!(!ElementFrame::new(90.0, 90.0, 20.0, 20.0).contained_in(&outer));
}

#[test]
fn invalid_canvas_is_rejected() {
    assert!(Canvas { width: 0, height: 10 }.validate().is_err());
    assert!(
        Canvas {
            width: 1200,
            height: 630
        }
        .validate()
        .is_ok()
    );
}
