use std::collections::HashMap;

use kurbo::Affine;
use vello_cpu::kurbo::Shape as _;

use crate::assets::fonts::FontBook;
use crate::compose::tree::{BoxPaint, RenderTree};
use crate::foundation::error::{AdmatError, AdmatResult};

/// Images prepared for capture, keyed by draw-box key, already decoded and
/// sized for their boxes.
#[derive(Default)]
pub struct CaptureAssets {
    pub images: HashMap<String, vello_cpu::Image>,
}

/// Rasterize a corrected render tree to a premultiplied RGBA8 pixmap at
/// `upscale` times the layout's canvas size.
///
/// Boxes are painted in tree order (the composer already sorted them).
/// Missing fonts and missing prepared images degrade to skipped boxes with a
/// logged event, never to a failed capture.
pub fn rasterize(
    tree: &RenderTree,
    assets: &CaptureAssets,
    fonts: &mut FontBook,
    upscale: f64,
) -> AdmatResult<vello_cpu::Pixmap> {
    if !upscale.is_finite() || upscale <= 0.0 {
        return Err(AdmatError::validation("upscale must be finite and > 0"));
    }
    let width = scaled_dim(tree.canvas.width, upscale)?;
    let height = scaled_dim(tree.canvas.height, upscale)?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    let base = Affine::scale(upscale) * tree.root_transform;

    for draw_box in &tree.boxes {
        let transform = base * draw_box.frame.place_transform();
        let (w, h) = (draw_box.frame.width, draw_box.frame.height);

        match &draw_box.paint {
            BoxPaint::Fill {
                color,
                corner_radius,
                centers_children: _,
            } => {
                ctx.set_transform(affine_to_cpu(transform));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                if *corner_radius > 0.0 {
                    let rounded =
                        vello_cpu::kurbo::RoundedRect::new(0.0, 0.0, w, h, *corner_radius);
                    ctx.fill_path(&rounded.to_path(0.25));
                } else {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
                }
            }
            BoxPaint::Image { opacity, .. } => {
                let Some(image) = assets.images.get(&draw_box.key) else {
                    tracing::warn!(key = draw_box.key, "no prepared image for box, skipping");
                    continue;
                };
                // Prepared images are sized at box-size × upscale; the box
                // transform already carries the upscale, so compensate.
                ctx.set_transform(affine_to_cpu(transform * Affine::scale(1.0 / upscale)));
                ctx.set_paint(image.clone());
                let opacity = *opacity as f32;
                if opacity < 1.0 {
                    ctx.push_opacity_layer(opacity);
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    w * upscale,
                    h * upscale,
                ));
                if opacity < 1.0 {
                    ctx.pop_layer();
                }
            }
            BoxPaint::Text {
                content,
                color,
                family,
                size,
                weight,
                line_height,
                letter_spacing,
                align,
                explicit_line_height,
            } => {
                if fonts.is_empty() {
                    tracing::warn!(
                        key = draw_box.key,
                        "no fonts registered, skipping text box"
                    );
                    continue;
                }
                if content.is_empty() {
                    continue;
                }
                let (layout, font) = fonts.layout_text(
                    content,
                    family,
                    *size,
                    *weight,
                    *line_height,
                    *letter_spacing,
                    *align,
                    w,
                    *color,
                )?;

                let y_offset = match explicit_line_height {
                    Some(line_box) => (line_box - f64::from(layout.height())) / 2.0,
                    None => 0.0,
                };
                ctx.set_transform(affine_to_cpu(transform * Affine::translate((0.0, y_offset))));

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn scaled_dim(dim: u32, upscale: f64) -> AdmatResult<u16> {
    let scaled = (f64::from(dim) * upscale).round() as i64;
    u16::try_from(scaled)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| AdmatError::validation("scaled canvas dimension out of range"))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/cpu.rs"]
mod tests;
