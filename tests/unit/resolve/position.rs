use super::*;

fn spec_default() -> ElementFrame {
    ElementFrame {
        x: 72.0,
        y: 150.0,
        width: 520.0,
        height: 200.0,
        rotation: 0.0,
        z_index: 2,
    }
}

#[test]
fn no_overrides_returns_spec_default_exactly() {
    assert_eq!(resolve_position(spec_default(), None, None), spec_default());
}

#[test]
fn precedence_is_spec_then_master_then_instance() {
    let master = FrameOverride {
        y: Some(50.0),
        width: Some(400.0),
        ..FrameOverride::default()
    };
    let instance = FrameOverride {
        x: Some(100.0),
        ..FrameOverride::default()
    };
    let out = resolve_position(spec_default(), Some(&master), Some(&instance));
    assert_eq!(out.x, 100.0);
    assert_eq!(out.y, 50.0);
    assert_eq!(out.width, 400.0);
    assert_eq!(out.height, 200.0);
    assert_eq!(out.z_index, 2);
}

#[test]
fn instance_beats_master_per_field() {
    let master = FrameOverride {
        x: Some(10.0),
        y: Some(10.0),
        ..FrameOverride::default()
    };
    let instance = FrameOverride {
        x: Some(999.0),
        ..FrameOverride::default()
    };
    let out = resolve_position(spec_default(), Some(&master), Some(&instance));
    assert_eq!(out.x, 999.0);
    assert_eq!(out.y, 10.0);
}

#[test]
fn partial_override_is_non_destructive() {
    let instance = FrameOverride {
        x: Some(100.0),
        ..FrameOverride::default()
    };
    let out = resolve_position(spec_default(), None, Some(&instance));
    assert_eq!(out.left(), 100.0);
    let spec = spec_default();
    assert_eq!(
        (out.y, out.width, out.height, out.rotation, out.z_index),
        (spec.y, spec.width, spec.height, spec.rotation, spec.z_index)
    );
}

#[test]
fn z_index_falls_through_independently() {
    let instance = FrameOverride {
        x: Some(1.0),
        width: Some(2.0),
        height: Some(3.0),
        rotation: Some(45.0),
        ..FrameOverride::default()
    };
    let out = resolve_position(spec_default(), None, Some(&instance));
    assert_eq!(out.z_index, spec_default().z_index);

    let with_z = FrameOverride {
        z_index: Some(9),
        ..FrameOverride::default()
    };
    assert_eq!(
        resolve_position(spec_default(), None, Some(&with_z)).z_index,
        9
    );
}

#[test]
fn resolution_never_mutates_the_master_table() {
    let mut masters = MasterOverrides::new();
    masters.set(
        "hero1",
        "headline",
        FrameOverride {
            y: Some(50.0),
            ..FrameOverride::default()
        },
    );
    let snapshot = masters.clone();
    let _ = resolve_position(spec_default(), masters.get("hero1", "headline"), None);
    assert_eq!(masters, snapshot);
}

#[test]
fn master_table_set_merges_field_wise() {
    let mut masters = MasterOverrides::new();
    masters.set(
        "hero1",
        "headline",
        FrameOverride {
            y: Some(50.0),
            ..FrameOverride::default()
        },
    );
    masters.set(
        "hero1",
        "headline",
        FrameOverride {
            width: Some(400.0),
            ..FrameOverride::default()
        },
    );
    let merged = masters.get("hero1", "headline").unwrap();
    assert_eq!(merged.y, Some(50.0));
    assert_eq!(merged.width, Some(400.0));
}

#[test]
fn master_table_wire_shape_is_nested_maps() {
    let mut masters = MasterOverrides::new();
    masters.set(
        "hero1",
        "headline",
        FrameOverride {
            x: Some(5.0),
            ..FrameOverride::default()
        },
    );
    let value = serde_json::to_value(&masters).unwrap();
    assert_eq!(value["hero1"]["headline"]["x"], 5.0);
}
