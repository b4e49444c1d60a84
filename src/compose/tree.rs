use kurbo::Affine;

use crate::foundation::color::Rgba8;
use crate::foundation::geom::{Canvas, ElementFrame};
use crate::layout::spec::{ObjectFit, TextAlign};

/// Fully resolved paint instructions for one draw box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxPaint {
    #[serde(rename_all = "camelCase")]
    Fill {
        color: Rgba8,
        corner_radius: f64,
        /// Set for containers that vertically center their text children;
        /// consumed by the capture correction step.
        centers_children: bool,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        color: Rgba8,
        family: String,
        size: f64,
        weight: u16,
        line_height: f64,
        letter_spacing: f64,
        align: TextAlign,
        /// Explicit pixel line height forced by the capture correction step
        /// (single-line vertical centering). `None` means the multiplier in
        /// `line_height` applies.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explicit_line_height: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        url: String,
        fit: ObjectFit,
        corner_radius: f64,
        opacity: f64,
        /// True when the URL is the flagged placeholder substitute.
        placeholder: bool,
    },
}

/// One absolutely positioned box of the resolved render tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawBox {
    /// Element key for specified elements, element id for custom ones.
    pub key: String,
    pub frame: ElementFrame,
    pub paint: BoxPaint,
    /// Custom elements form an independent layer painted after specified
    /// elements on z ties.
    pub custom: bool,
    /// Hit-testing affordance, set only in editor mode. Never affects
    /// visual output.
    pub selectable: bool,
}

/// The single artifact both rasterization paths consume: an ordered list of
/// fully resolved draw boxes, painted front to back in ascending z-index
/// with declaration-order tie-breaks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub layout_key: String,
    pub canvas: Canvas,
    /// Residual transform on the tree root (editor zoom/pan). Stripped by
    /// the capture correction step unless a rotated box requires it.
    #[serde(default = "Affine::default")]
    pub root_transform: Affine,
    pub boxes: Vec<DrawBox>,
}

impl RenderTree {
    pub fn text_boxes(&self) -> impl Iterator<Item = &DrawBox> {
        self.boxes
            .iter()
            .filter(|b| matches!(b.paint, BoxPaint::Text { .. }))
    }

    pub fn image_boxes(&self) -> impl Iterator<Item = &DrawBox> {
        self.boxes
            .iter()
            .filter(|b| matches!(b.paint, BoxPaint::Image { .. }))
    }

    pub fn has_rotated_box(&self) -> bool {
        self.boxes.iter().any(|b| b.frame.rotation != 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/tree.rs"]
mod tests;
