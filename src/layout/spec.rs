use std::collections::BTreeSet;

use crate::brand::model::{ColorRole, TextPreset};
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::foundation::geom::{Canvas, ElementFrame};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    #[default]
    Row,
    Column,
}

/// Text element: a brand typography preset plus optional per-element style
/// overrides (explicit ordered merge, preset < descriptor), a color-role
/// binding, and a copy-field binding with a baked-in fallback string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
    pub preset: TextPreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub transform: TextTransform,
    pub color_role: ColorRole,
    pub copy_field: String,
    /// Shown whenever the SKU has no copy for this field; never empty.
    pub fallback: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub image_role: String,
    #[serde(default)]
    pub fit: ObjectFit,
    #[serde(default)]
    pub corner_radius: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSpec {
    pub fill_role: ColorRole,
    #[serde(default)]
    pub corner_radius: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    pub fill_role: ColorRole,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub padding: f64,
    #[serde(default)]
    pub direction: FlowDirection,
    /// Containers that vertically center their text children. The capture
    /// path applies a line-height correction to such children (see
    /// `raster::fixup`).
    #[serde(default)]
    pub centers_children: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSpec {
    pub fill_role: ColorRole,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKindSpec {
    Text(TextSpec),
    Image(ImageSpec),
    Shape(ShapeSpec),
    Container(ContainerSpec),
    Background(BackgroundSpec),
}

/// One declared element of a layout. `key` is unique within the layout and
/// stable across versions (overrides key on it); `label` is the
/// human-readable name the admin UI shows and color overrides key on.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    pub key: String,
    pub label: String,
    pub frame: ElementFrame,
    pub kind: ElementKindSpec,
}

/// Static declarative description of one layout type: a fixed canvas and an
/// ordered list of element descriptors. Declaration order is meaningful: it
/// breaks z-index ties at paint time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpecification {
    pub canvas: Canvas,
    pub elements: Vec<ElementSpec>,
}

impl LayoutSpecification {
    pub fn element(&self, key: &str) -> Option<&ElementSpec> {
        self.elements.iter().find(|e| e.key == key)
    }

    /// Fallback copy string for a copy-field key, if any text element binds it.
    pub fn copy_fallback(&self, field: &str) -> Option<&str> {
        self.elements.iter().find_map(|e| match &e.kind {
            ElementKindSpec::Text(t) if t.copy_field == field => Some(t.fallback.as_str()),
            _ => None,
        })
    }

    pub fn validate(&self) -> AdmatResult<()> {
        self.canvas.validate()?;
        let mut seen = BTreeSet::new();
        for element in &self.elements {
            if element.key.trim().is_empty() {
                return Err(AdmatError::validation("element key must be non-empty"));
            }
            if !seen.insert(element.key.as_str()) {
                return Err(AdmatError::validation(format!(
                    "duplicate element key '{}'",
                    element.key
                )));
            }
            if let ElementKindSpec::Text(t) = &element.kind {
                if t.fallback.trim().is_empty() {
                    return Err(AdmatError::validation(format!(
                        "text element '{}' must carry a non-empty fallback string",
                        element.key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
