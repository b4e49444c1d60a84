use crate::brand::model::Brand;
use crate::layout::spec::TextTransform;
use crate::sku::model::Sku;

/// Reserved URL for the deterministic placeholder asset substituted when an
/// image role resolves to nothing. The capture path synthesizes a
/// checkerboard for it; a real DAM never serves this scheme.
pub const PLACEHOLDER_IMAGE_URL: &str = "admat://placeholder";

/// Opacity applied to placeholder image boxes so missing assets are visibly
/// flagged without disturbing canvas geometry.
pub const PLACEHOLDER_OPACITY: f64 = 0.45;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Sku,
    Brand,
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    pub url: String,
    pub source: ImageSource,
}

impl ResolvedImage {
    pub fn is_placeholder(&self) -> bool {
        self.source == ImageSource::Placeholder
    }
}

/// Resolve a text element's content: the SKU's copy for the field when it is
/// set and non-blank, the layout's baked-in fallback otherwise. The result
/// is never empty as long as the layout passed validation.
pub fn resolve_copy(sku: &Sku, layout_key: &str, copy_field: &str, fallback: &str) -> String {
    match sku.copy_field(layout_key, copy_field) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Resolve an image role to a literal URL. Sources tried in order:
///
/// 1. SKU image map
/// 2. brand image map
/// 3. terminal default: the flagged placeholder asset
pub fn resolve_image(brand: &Brand, sku: &Sku, image_role: &str) -> ResolvedImage {
    let sources = [
        (ImageSource::Sku, sku.images.get(image_role)),
        (ImageSource::Brand, brand.images.get(image_role)),
    ];
    for (source, url) in sources {
        if let Some(url) = url {
            if !url.trim().is_empty() {
                return ResolvedImage {
                    url: url.clone(),
                    source,
                };
            }
        }
    }
    tracing::debug!(role = image_role, "image role unresolved, substituting placeholder");
    ResolvedImage {
        url: PLACEHOLDER_IMAGE_URL.to_string(),
        source: ImageSource::Placeholder,
    }
}

/// Text transforms are applied at compose time so both rasterization paths
/// consume identical content.
pub fn apply_text_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/content.rs"]
mod tests;
