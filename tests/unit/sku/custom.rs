use super::*;

#[test]
fn custom_element_json_roundtrip() {
    let element = CustomElement {
        id: "el-1".to_string(),
        kind: CustomKind::Badge,
        frame: ElementFrame::new(10.0, 20.0, 120.0, 40.0).with_z(9),
        style: CustomStyle {
            font_size: Some(18.0),
            background_role: Some("badge".to_string()),
            corner_radius: 20.0,
            ..CustomStyle::default()
        },
        content: CustomContent::Text("New".to_string()),
    };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(value["kind"], "badge");
    assert_eq!(value["frame"]["zIndex"], 9);
    assert_eq!(value["content"]["text"], "New");
    assert_eq!(value["style"]["backgroundRole"], "badge");

    let back: CustomElement = serde_json::from_value(value).unwrap();
    assert_eq!(back, element);
}

#[test]
fn image_content_uses_image_role_key() {
    let content = CustomContent::ImageRole("lifestyle".to_string());
    let value = serde_json::to_value(&content).unwrap();
    assert_eq!(value["imageRole"], "lifestyle");
}

#[test]
fn content_override_skips_unset_fields() {
    let patch = CustomContentOverride {
        image_key: Some("alt".to_string()),
        ..CustomContentOverride::default()
    };
    let value = serde_json::to_value(&patch).unwrap();
    assert_eq!(value, serde_json::json!({"imageKey": "alt"}));
}
