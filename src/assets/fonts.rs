use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::compose::tree::{BoxPaint, RenderTree};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::layout::spec::TextAlign;

pub struct RegisteredFamily {
    pub name: String,
    pub font_data: vello_cpu::peniko::FontData,
    bytes: Arc<Vec<u8>>,
}

/// Registered brand fonts plus the Parley shaping contexts.
///
/// Families are registered from explicit bytes or a directory scan; a brand
/// family resolves case-insensitively with fallback to the first registered
/// family. An empty book does not fail capture: text boxes are skipped with
/// a logged degradation instead.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    families: Vec<RegisteredFamily>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
        }
    }

    /// Register a font from raw bytes; returns the family name the font
    /// declares.
    pub fn register_bytes(&mut self, bytes: Vec<u8>) -> AdmatResult<String> {
        let bytes = Arc::new(bytes);
        let registered = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
        let family_id = registered
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| AdmatError::validation("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdmatError::validation("registered font family has no name"))?
            .to_string();

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        self.families.push(RegisteredFamily {
            name: name.clone(),
            font_data,
            bytes,
        });
        Ok(name)
    }

    pub fn register_file(&mut self, path: &Path) -> AdmatResult<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
        self.register_bytes(bytes)
    }

    /// Register every `.ttf`/`.otf` file in a directory. Returns the number
    /// of families registered.
    pub fn scan_dir(&mut self, dir: &Path) -> AdmatResult<usize> {
        let mut count = 0;
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("scan font dir '{}'", dir.display()))?;
        for entry in entries {
            let path = entry.context("read font dir entry")?.path();
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            if matches!(ext.as_deref(), Some("ttf") | Some("otf")) {
                self.register_file(&path)?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Case-insensitive family lookup with fallback to the first registered
    /// family. `None` only when the book is empty.
    pub fn resolve(&self, family: &str) -> Option<&RegisteredFamily> {
        self.families
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(family))
            .or_else(|| self.families.first())
    }

    /// "Fonts ready" for a tree: every family referenced by its text boxes
    /// resolves to a registered family.
    pub fn ready_for(&self, tree: &RenderTree) -> bool {
        tree.text_boxes().all(|b| match &b.paint {
            BoxPaint::Text { family, .. } => self.resolve(family).is_some(),
            _ => true,
        })
    }

    /// Shape and lay out one text box's content. Returns the Parley layout
    /// and the font to draw its glyph runs with.
    #[allow(clippy::too_many_arguments)]
    pub fn layout_text(
        &mut self,
        text: &str,
        family: &str,
        size: f64,
        weight: u16,
        line_height: f64,
        letter_spacing: f64,
        align: TextAlign,
        max_width: f64,
        brush: Rgba8,
    ) -> AdmatResult<(parley::Layout<Rgba8>, vello_cpu::peniko::FontData)> {
        if !size.is_finite() || size <= 0.0 {
            return Err(AdmatError::validation("text size must be finite and > 0"));
        }
        let resolved = self
            .resolve(family)
            .ok_or_else(|| AdmatError::validation("no fonts registered"))?;
        let family_name = resolved.name.clone();
        let font_data = resolved.font_data.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(weight as f32),
        ));
        builder.push_default(parley::style::StyleProperty::LineHeight(
            parley::style::LineHeight::FontSizeRelative(line_height as f32),
        ));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            letter_spacing as f32,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width as f32));
        layout.align(
            Some(max_width as f32),
            parley_alignment(align),
            parley::AlignmentOptions::default(),
        );

        Ok((layout, font_data))
    }

    pub fn family_bytes(&self, family: &str) -> Option<&[u8]> {
        self.resolve(family).map(|f| f.bytes.as_slice())
    }
}

fn parley_alignment(align: TextAlign) -> parley::Alignment {
    match align {
        TextAlign::Left => parley::Alignment::Start,
        TextAlign::Center => parley::Alignment::Center,
        TextAlign::Right => parley::Alignment::End,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
