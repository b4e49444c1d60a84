use crate::foundation::geom::ElementFrame;
use crate::layout::spec::ObjectFit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomKind {
    Text,
    Badge,
    Image,
    Shape,
}

/// Styling carried by an ad-hoc element. Color fields hold color-role *names*
/// (resolved fail-closed at compose time), never literal colors.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_role: Option<String>,
    pub padding: f64,
    pub corner_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ObjectFit>,
}

/// Default content of a custom element: a literal string for text-like kinds,
/// an image-role key for image kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomContent {
    Text(String),
    ImageRole(String),
}

/// A user-added element attached to one (SKU, layout) instance. Resolved
/// through the same override machinery as specified elements but keyed by its
/// own id, since there is no specification default to fall back to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomElement {
    pub id: String,
    pub kind: CustomKind,
    pub frame: ElementFrame,
    #[serde(default)]
    pub style: CustomStyle,
    pub content: CustomContent,
}

impl CustomElement {
    pub fn text(id: impl Into<String>, content: impl Into<String>, frame: ElementFrame) -> Self {
        Self {
            id: id.into(),
            kind: CustomKind::Text,
            frame,
            style: CustomStyle::default(),
            content: CustomContent::Text(content.into()),
        }
    }
}

/// Per-instance content override for a custom element, keyed by element id.
///
/// Wire shape (stored verbatim): `{text?, colorKey?, imageKey?}`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomContentOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/sku/custom.rs"]
mod tests;
