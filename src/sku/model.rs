use std::collections::BTreeMap;

use crate::foundation::geom::FrameOverride;
use crate::sku::custom::{CustomContentOverride, CustomElement};

/// A product instance within a brand. Supplies per-layout copy, images and
/// the three instance-level override maps.
///
/// Every map is optional and partial: a SKU with entirely empty data still
/// composes to a complete, non-crashing image via layout fallbacks.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub brand_id: u64,
    #[serde(default)]
    pub name: String,

    /// layoutKey → copy-field key → text
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub copy: BTreeMap<String, BTreeMap<String, String>>,

    /// image-role → asset URL (tried before the brand's image map)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, String>,

    /// positionOverrides\[layoutKey\]\[elementKey\] = partial geometry
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub position_overrides: BTreeMap<String, BTreeMap<String, FrameOverride>>,

    /// colorOverrides\[layoutKey\]\[fieldLabel\] = color-role name.
    /// Keyed by human-readable field label so the admin UI can present
    /// overrides per visible field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub color_overrides: BTreeMap<String, BTreeMap<String, String>>,

    /// customElementContent\[elementId\] = {text?, colorKey?, imageKey?}
    #[serde(
        default,
        rename = "customElementContent",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub custom_content: BTreeMap<String, CustomContentOverride>,

    /// layoutKey → ad-hoc elements added in the visual editor
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_elements: BTreeMap<String, Vec<CustomElement>>,
}

impl Sku {
    pub fn new(id: u64, brand_id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            brand_id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn copy_field(&self, layout_key: &str, field: &str) -> Option<&str> {
        self.copy
            .get(layout_key)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn position_override(&self, layout_key: &str, element_key: &str) -> Option<&FrameOverride> {
        self.position_overrides
            .get(layout_key)
            .and_then(|elements| elements.get(element_key))
    }

    pub fn custom_elements_for(&self, layout_key: &str) -> &[CustomElement] {
        self.custom_elements
            .get(layout_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sku/model.rs"]
mod tests;
