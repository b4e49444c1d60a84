use kurbo::{Affine, Point, Rect};

use crate::foundation::error::{AdmatError, AdmatResult};

/// Fixed layout canvas in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn validate(&self) -> AdmatResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AdmatError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }
}

/// Fully resolved absolute geometry of one element.
///
/// `x`/`y` are the canonical field names; `left`/`top` are accepted as input
/// aliases so stored overrides written by either name read consistently.
/// Rotation is in degrees and always pivots around the box center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFrame {
    #[serde(alias = "left")]
    pub x: f64,
    #[serde(alias = "top")]
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
}

impl ElementFrame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            z_index: 0,
        }
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    pub fn with_rotation(mut self, deg: f64) -> Self {
        self.rotation = deg;
        self
    }

    /// `left` alias for `x`.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// `top` alias for `y`.
    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether this box lies entirely inside `outer` (edges inclusive).
    pub fn contained_in(&self, outer: &ElementFrame) -> bool {
        let a = self.rect();
        let b = outer.rect();
        a.x0 >= b.x0 && a.y0 >= b.y0 && a.x1 <= b.x1 && a.y1 <= b.y1
    }

    /// Canvas-space placement transform for content drawn in box-local
    /// coordinates (origin at the box top-left). Translation first, rotation
    /// last, pivoting around the box center.
    pub fn place_transform(&self) -> Affine {
        let place = Affine::translate((self.x, self.y));
        if self.rotation == 0.0 {
            place
        } else {
            Affine::rotate_about(self.rotation.to_radians(), self.center()) * place
        }
    }
}

/// One tier of a geometry override. Every field is optional: a tier replaces
/// only what it explicitly sets, everything else passes through unchanged.
///
/// Wire shape (stored verbatim):
/// `{x?, y?, width?, height?, rotation?, zIndex?}` with `left`/`top` accepted
/// as aliases for `x`/`y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameOverride {
    #[serde(alias = "left", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(alias = "top", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl FrameOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this tier on top of `base`, producing a new frame.
    pub fn apply_to(&self, base: ElementFrame) -> ElementFrame {
        ElementFrame {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            rotation: self.rotation.unwrap_or(base.rotation),
            z_index: self.z_index.unwrap_or(base.z_index),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;
