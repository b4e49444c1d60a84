use kurbo::Affine;

use crate::brand::model::{Brand, ColorRole, Palette, Typography};
use crate::brand::variations::ColorVariation;
use crate::compose::tree::{BoxPaint, DrawBox, RenderTree};
use crate::foundation::error::AdmatResult;
use crate::layout::catalog::Catalog;
use crate::layout::spec::{ElementKindSpec, TextAlign, TextSpec};
use crate::resolve::color::{resolve_color, resolve_role_name};
use crate::resolve::content::{
    PLACEHOLDER_OPACITY, apply_text_transform, resolve_copy, resolve_image,
};
use crate::resolve::position::{MasterOverrides, resolve_position};
use crate::sku::custom::{CustomContent, CustomElement, CustomKind};
use crate::sku::model::Sku;

#[derive(Clone, Debug, Default)]
pub struct ComposeOpts {
    /// Enables hit-testing affordances on custom boxes. Never changes
    /// visual output.
    pub editor: bool,
    /// Color variation layered temporarily over the brand palette. Stored
    /// brand data is never touched.
    pub variation: Option<ColorVariation>,
}

/// Resolve a layout against a brand and SKU snapshot into a render tree.
///
/// Pure and deterministic: identical inputs produce structurally identical
/// trees. Inputs are fully materialized values; no reference is held across
/// any asynchronous boundary. Paint order is ascending z-index with ties
/// broken by declaration order, specified elements before custom ones.
#[tracing::instrument(skip_all, fields(layout = layout_key, sku = sku.id))]
pub fn compose(
    catalog: &Catalog,
    layout_key: &str,
    brand: &Brand,
    sku: &Sku,
    masters: &MasterOverrides,
    opts: &ComposeOpts,
) -> AdmatResult<RenderTree> {
    let spec = catalog.spec(layout_key)?;
    let palette = match &opts.variation {
        Some(variation) => variation.apply(&brand.palette),
        None => brand.palette.clone(),
    };

    let mut boxes = Vec::with_capacity(spec.elements.len());

    for element in &spec.elements {
        let frame = resolve_position(
            element.frame,
            masters.get(layout_key, &element.key),
            sku.position_override(layout_key, &element.key),
        );

        let paint = match &element.kind {
            ElementKindSpec::Background(bg) => BoxPaint::Fill {
                color: resolve_color(
                    &palette,
                    &sku.color_overrides,
                    layout_key,
                    &element.label,
                    bg.fill_role,
                ),
                corner_radius: 0.0,
                centers_children: false,
            },
            ElementKindSpec::Shape(shape) => BoxPaint::Fill {
                color: resolve_color(
                    &palette,
                    &sku.color_overrides,
                    layout_key,
                    &element.label,
                    shape.fill_role,
                ),
                corner_radius: shape.corner_radius,
                centers_children: false,
            },
            ElementKindSpec::Container(container) => BoxPaint::Fill {
                color: resolve_color(
                    &palette,
                    &sku.color_overrides,
                    layout_key,
                    &element.label,
                    container.fill_role,
                ),
                corner_radius: container.corner_radius,
                centers_children: container.centers_children,
            },
            ElementKindSpec::Text(text) => {
                let style = merged_text_style(&brand.typography, text);
                let raw = resolve_copy(sku, layout_key, &text.copy_field, &text.fallback);
                BoxPaint::Text {
                    content: apply_text_transform(&raw, text.transform),
                    color: resolve_color(
                        &palette,
                        &sku.color_overrides,
                        layout_key,
                        &element.label,
                        text.color_role,
                    ),
                    family: brand.typography.family.clone(),
                    size: style.size,
                    weight: style.weight,
                    line_height: style.line_height,
                    letter_spacing: style.letter_spacing,
                    align: text.align,
                    explicit_line_height: None,
                }
            }
            ElementKindSpec::Image(image) => {
                let resolved = resolve_image(brand, sku, &image.image_role);
                let placeholder = resolved.is_placeholder();
                BoxPaint::Image {
                    url: resolved.url,
                    fit: image.fit,
                    corner_radius: image.corner_radius,
                    opacity: if placeholder { PLACEHOLDER_OPACITY } else { 1.0 },
                    placeholder,
                }
            }
        };

        boxes.push(DrawBox {
            key: element.key.clone(),
            frame,
            paint,
            custom: false,
            selectable: false,
        });
    }

    for element in sku.custom_elements_for(layout_key) {
        compose_custom(
            layout_key, brand, sku, &palette, masters, opts, element, &mut boxes,
        );
    }

    // Stable sort keeps declaration order on z ties, and custom boxes were
    // pushed after specified ones.
    boxes.sort_by_key(|b| b.frame.z_index);

    Ok(RenderTree {
        layout_key: layout_key.to_string(),
        canvas: spec.canvas,
        root_transform: Affine::IDENTITY,
        boxes,
    })
}

struct MergedTextStyle {
    size: f64,
    weight: u16,
    line_height: f64,
    letter_spacing: f64,
}

/// Explicit ordered merge over the closed set of text style fields:
/// brand preset first, then any field the descriptor sets.
fn merged_text_style(typography: &Typography, spec: &TextSpec) -> MergedTextStyle {
    let preset = typography.preset(spec.preset);
    MergedTextStyle {
        size: spec.size.unwrap_or(preset.size),
        weight: spec.weight.unwrap_or(preset.weight),
        line_height: spec.line_height.unwrap_or(preset.line_height),
        letter_spacing: spec.letter_spacing.unwrap_or(preset.letter_spacing),
    }
}

#[allow(clippy::too_many_arguments)]
fn compose_custom(
    layout_key: &str,
    brand: &Brand,
    sku: &Sku,
    palette: &Palette,
    masters: &MasterOverrides,
    opts: &ComposeOpts,
    element: &CustomElement,
    boxes: &mut Vec<DrawBox>,
) {
    let content_override = sku.custom_content.get(&element.id);
    let frame = resolve_position(
        element.frame,
        masters.get(layout_key, &element.id),
        sku.position_override(layout_key, &element.id),
    );

    let default_text = || match &element.content {
        CustomContent::Text(text) if !text.trim().is_empty() => text.clone(),
        _ => "Text".to_string(),
    };
    let text_content = content_override
        .and_then(|o| o.text.clone())
        .unwrap_or_else(default_text);
    let color_key = content_override.and_then(|o| o.color_key.as_deref());

    let text_paint = |content: String, default_role: ColorRole, role_override: Option<&str>| {
        let body = brand.typography.body;
        BoxPaint::Text {
            content,
            color: resolve_role_name(
                palette,
                role_override.or(element.style.text_role.as_deref()),
                default_role,
            ),
            family: brand.typography.family.clone(),
            size: element.style.font_size.unwrap_or(body.size),
            weight: element.style.font_weight.unwrap_or(body.weight),
            line_height: body.line_height,
            letter_spacing: body.letter_spacing,
            align: TextAlign::Left,
            explicit_line_height: None,
        }
    };

    let selectable = opts.editor;
    let mut push = |key: String, paint: BoxPaint| {
        boxes.push(DrawBox {
            key,
            frame,
            paint,
            custom: true,
            selectable,
        });
    };

    match element.kind {
        CustomKind::Text => {
            push(element.id.clone(), text_paint(text_content, ColorRole::Text, color_key));
        }
        CustomKind::Badge => {
            // Badges are a fill plus a centered label; the colorKey override
            // restyles the fill, the label keeps its own role.
            push(
                format!("{}.bg", element.id),
                BoxPaint::Fill {
                    color: resolve_role_name(
                        palette,
                        color_key.or(element.style.background_role.as_deref()),
                        ColorRole::Badge,
                    ),
                    corner_radius: element.style.corner_radius,
                    centers_children: true,
                },
            );
            let mut label = text_paint(text_content, ColorRole::Text, None);
            if let BoxPaint::Text { align, .. } = &mut label {
                *align = TextAlign::Center;
            }
            push(element.id.clone(), label);
        }
        CustomKind::Shape => {
            push(
                element.id.clone(),
                BoxPaint::Fill {
                    color: resolve_role_name(
                        palette,
                        color_key.or(element.style.background_role.as_deref()),
                        ColorRole::Primary,
                    ),
                    corner_radius: element.style.corner_radius,
                    centers_children: false,
                },
            );
        }
        CustomKind::Image => {
            let role = content_override
                .and_then(|o| o.image_key.as_deref())
                .or(match &element.content {
                    CustomContent::ImageRole(role) => Some(role.as_str()),
                    CustomContent::Text(_) => None,
                })
                .unwrap_or("");
            let resolved = resolve_image(brand, sku, role);
            let placeholder = resolved.is_placeholder();
            push(
                element.id.clone(),
                BoxPaint::Image {
                    url: resolved.url,
                    fit: element.style.fit.unwrap_or_default(),
                    corner_radius: element.style.corner_radius,
                    opacity: if placeholder { PLACEHOLDER_OPACITY } else { 1.0 },
                    placeholder,
                },
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
