use crate::brand::model::{ColorRole, TextPreset};
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::foundation::geom::{Canvas, ElementFrame};
use crate::layout::spec::{
    BackgroundSpec, ContainerSpec, ElementKindSpec, ElementSpec, ImageSpec, LayoutSpecification,
    ObjectFit, ShapeSpec, TextAlign, TextSpec, TextTransform,
};

/// One copy field of a layout's admin form schema. Copy shapes are declared
/// here once and validated at the boundary (form submission, completion
/// responses), never inside render code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyField {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
}

/// Admin-managed catalog entry. `key` is the immutable identifier every
/// override map and copy map keys on. Disabling hides the layout from
/// selection UIs; stored instance data stays resolvable.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTemplate {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub spec: LayoutSpecification,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copy_schema: Vec<CopyField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// The layout catalog. Lookup by key intentionally includes disabled
/// templates so historical exports keep resolving; selection UIs go through
/// [`Catalog::enabled`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    pub templates: Vec<LayoutTemplate>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            templates: vec![hero1(), testimonial1(), compare1(), stat1(), card1()],
        }
    }

    pub fn get(&self, key: &str) -> Option<&LayoutTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }

    pub fn spec(&self, key: &str) -> AdmatResult<&LayoutSpecification> {
        self.get(key)
            .map(|t| &t.spec)
            .ok_or_else(|| AdmatError::UnknownLayout(key.to_string()))
    }

    pub fn enabled(&self) -> impl Iterator<Item = &LayoutTemplate> {
        self.templates.iter().filter(|t| t.enabled)
    }

    pub fn validate(&self) -> AdmatResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for template in &self.templates {
            if !seen.insert(template.key.as_str()) {
                return Err(AdmatError::validation(format!(
                    "duplicate layout key '{}'",
                    template.key
                )));
            }
            template.spec.validate()?;
        }
        Ok(())
    }
}

fn frame(x: f64, y: f64, w: f64, h: f64, z: i32) -> ElementFrame {
    ElementFrame::new(x, y, w, h).with_z(z)
}

fn background(key: &str, label: &str, canvas: Canvas, role: ColorRole) -> ElementSpec {
    ElementSpec {
        key: key.to_string(),
        label: label.to_string(),
        frame: frame(0.0, 0.0, canvas.width as f64, canvas.height as f64, 0),
        kind: ElementKindSpec::Background(BackgroundSpec { fill_role: role }),
    }
}

#[allow(clippy::too_many_arguments)]
fn text(
    key: &str,
    label: &str,
    frame: ElementFrame,
    preset: TextPreset,
    role: ColorRole,
    copy_field: &str,
    fallback: &str,
) -> ElementSpec {
    ElementSpec {
        key: key.to_string(),
        label: label.to_string(),
        frame,
        kind: ElementKindSpec::Text(TextSpec {
            preset,
            size: None,
            weight: None,
            line_height: None,
            letter_spacing: None,
            align: TextAlign::Left,
            transform: TextTransform::None,
            color_role: role,
            copy_field: copy_field.to_string(),
            fallback: fallback.to_string(),
        }),
    }
}

fn image(key: &str, label: &str, frame: ElementFrame, role: &str, fit: ObjectFit) -> ElementSpec {
    ElementSpec {
        key: key.to_string(),
        label: label.to_string(),
        frame,
        kind: ElementKindSpec::Image(ImageSpec {
            image_role: role.to_string(),
            fit,
            corner_radius: 0.0,
        }),
    }
}

fn shape(key: &str, label: &str, frame: ElementFrame, role: ColorRole, radius: f64) -> ElementSpec {
    ElementSpec {
        key: key.to_string(),
        label: label.to_string(),
        frame,
        kind: ElementKindSpec::Shape(ShapeSpec {
            fill_role: role,
            corner_radius: radius,
        }),
    }
}

fn centered_container(
    key: &str,
    label: &str,
    frame: ElementFrame,
    role: ColorRole,
    radius: f64,
) -> ElementSpec {
    ElementSpec {
        key: key.to_string(),
        label: label.to_string(),
        frame,
        kind: ElementKindSpec::Container(ContainerSpec {
            fill_role: role,
            corner_radius: radius,
            padding: 16.0,
            direction: crate::layout::spec::FlowDirection::Row,
            centers_children: true,
        }),
    }
}

fn copy_field(key: &str, label: &str, placeholder: &str, required: bool) -> CopyField {
    CopyField {
        key: key.to_string(),
        label: label.to_string(),
        placeholder: placeholder.to_string(),
        required,
    }
}

fn with(mut spec: ElementSpec, edit: impl FnOnce(&mut TextSpec)) -> ElementSpec {
    if let ElementKindSpec::Text(t) = &mut spec.kind {
        edit(t);
    }
    spec
}

/// Hero banner, 1200×630: full-bleed product image on the right, headline and
/// CTA on the left.
fn hero1() -> LayoutTemplate {
    let canvas = Canvas {
        width: 1200,
        height: 630,
    };
    LayoutTemplate {
        key: "hero1".to_string(),
        name: "Hero banner".to_string(),
        description: "Full-width hero with headline, subhead, CTA and product image".to_string(),
        category: "hero".to_string(),
        enabled: true,
        spec: LayoutSpecification {
            canvas,
            elements: vec![
                background("bg", "Background", canvas, ColorRole::Background),
                image(
                    "product",
                    "Product image",
                    frame(640.0, 40.0, 520.0, 550.0, 1),
                    "product",
                    ObjectFit::Cover,
                ),
                with(
                    text(
                        "overline",
                        "Overline",
                        frame(72.0, 96.0, 460.0, 32.0, 2),
                        TextPreset::Overline,
                        ColorRole::Accent,
                        "overline",
                        "New arrival",
                    ),
                    |t| t.transform = TextTransform::Uppercase,
                ),
                text(
                    "headline",
                    "Headline",
                    frame(72.0, 150.0, 520.0, 200.0, 2),
                    TextPreset::Display,
                    ColorRole::Primary,
                    "headline",
                    "Made to be noticed",
                ),
                text(
                    "subhead",
                    "Subhead",
                    frame(72.0, 370.0, 480.0, 90.0, 2),
                    TextPreset::Body,
                    ColorRole::TextSecondary,
                    "subhead",
                    "A short supporting line that earns the click.",
                ),
                centered_container(
                    "ctaBox",
                    "CTA button",
                    frame(72.0, 490.0, 240.0, 64.0, 3),
                    ColorRole::Primary,
                    32.0,
                ),
                with(
                    text(
                        "ctaLabel",
                        "CTA label",
                        frame(72.0, 490.0, 240.0, 64.0, 4),
                        TextPreset::Cta,
                        ColorRole::Background,
                        "cta",
                        "Shop now",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
            ],
        },
        copy_schema: vec![
            copy_field("overline", "Overline", "New arrival", false),
            copy_field("headline", "Headline", "Made to be noticed", true),
            copy_field("subhead", "Subhead", "Supporting line", true),
            copy_field("cta", "CTA label", "Shop now", false),
        ],
        thumbnail: None,
    }
}

/// Testimonial card, 1080×1080: quote, attribution and small avatar.
fn testimonial1() -> LayoutTemplate {
    let canvas = Canvas {
        width: 1080,
        height: 1080,
    };
    LayoutTemplate {
        key: "testimonial1".to_string(),
        name: "Testimonial card".to_string(),
        description: "Square quote card with attribution and avatar".to_string(),
        category: "testimonial".to_string(),
        enabled: true,
        spec: LayoutSpecification {
            canvas,
            elements: vec![
                background("bg", "Background", canvas, ColorRole::BackgroundAlt),
                shape(
                    "quotePanel",
                    "Quote panel",
                    frame(90.0, 140.0, 900.0, 640.0, 1),
                    ColorRole::Background,
                    28.0,
                ),
                with(
                    text(
                        "quote",
                        "Quote",
                        frame(150.0, 220.0, 780.0, 420.0, 2),
                        TextPreset::H1,
                        ColorRole::Text,
                        "quote",
                        "\u{201c}The best purchase I made this year.\u{201d}",
                    ),
                    |t| t.line_height = Some(1.25),
                ),
                image(
                    "avatar",
                    "Avatar",
                    frame(90.0, 840.0, 120.0, 120.0, 2),
                    "avatar",
                    ObjectFit::Cover,
                ),
                text(
                    "author",
                    "Author",
                    frame(240.0, 860.0, 600.0, 44.0, 2),
                    TextPreset::Cta,
                    ColorRole::Primary,
                    "author",
                    "Jordan M.",
                ),
                text(
                    "role",
                    "Author role",
                    frame(240.0, 910.0, 600.0, 36.0, 2),
                    TextPreset::Body,
                    ColorRole::TextSecondary,
                    "role",
                    "Verified customer",
                ),
            ],
        },
        copy_schema: vec![
            copy_field("quote", "Quote", "Customer quote", true),
            copy_field("author", "Author", "Name", true),
            copy_field("role", "Author role", "Verified customer", false),
        ],
        thumbnail: None,
    }
}

/// Before/after comparison, 1200×628: two panels with labels and a verdict
/// badge.
fn compare1() -> LayoutTemplate {
    let canvas = Canvas {
        width: 1200,
        height: 628,
    };
    LayoutTemplate {
        key: "compare1".to_string(),
        name: "Comparison".to_string(),
        description: "Us-vs-them split with per-side labels and verdict badge".to_string(),
        category: "compare".to_string(),
        enabled: true,
        spec: LayoutSpecification {
            canvas,
            elements: vec![
                background("bg", "Background", canvas, ColorRole::Background),
                with(
                    text(
                        "headline",
                        "Headline",
                        frame(80.0, 56.0, 1040.0, 80.0, 1),
                        TextPreset::H1,
                        ColorRole::Primary,
                        "headline",
                        "Why switch?",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
                shape(
                    "leftPanel",
                    "Left panel",
                    frame(80.0, 170.0, 500.0, 380.0, 1),
                    ColorRole::BackgroundAlt,
                    20.0,
                ),
                shape(
                    "rightPanel",
                    "Right panel",
                    frame(620.0, 170.0, 500.0, 380.0, 1),
                    ColorRole::Primary,
                    20.0,
                ),
                with(
                    text(
                        "leftLabel",
                        "Left label",
                        frame(120.0, 210.0, 420.0, 48.0, 2),
                        TextPreset::H2,
                        ColorRole::TextSecondary,
                        "leftLabel",
                        "Them",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
                with(
                    text(
                        "rightLabel",
                        "Right label",
                        frame(660.0, 210.0, 420.0, 48.0, 2),
                        TextPreset::H2,
                        ColorRole::Background,
                        "rightLabel",
                        "Us",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
                text(
                    "leftBody",
                    "Left body",
                    frame(120.0, 280.0, 420.0, 230.0, 2),
                    TextPreset::Body,
                    ColorRole::TextSecondary,
                    "leftBody",
                    "Slow, dated, one-size-fits-all.",
                ),
                text(
                    "rightBody",
                    "Right body",
                    frame(660.0, 280.0, 420.0, 230.0, 2),
                    TextPreset::Body,
                    ColorRole::Background,
                    "rightBody",
                    "Fast, modern, made for you.",
                ),
                centered_container(
                    "verdictBadge",
                    "Verdict badge",
                    frame(480.0, 540.0, 240.0, 56.0, 3),
                    ColorRole::Accent,
                    28.0,
                ),
                with(
                    text(
                        "verdict",
                        "Verdict",
                        frame(480.0, 540.0, 240.0, 56.0, 4),
                        TextPreset::Badge,
                        ColorRole::Background,
                        "verdict",
                        "Easy choice",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
            ],
        },
        copy_schema: vec![
            copy_field("headline", "Headline", "Why switch?", true),
            copy_field("leftLabel", "Left label", "Them", false),
            copy_field("rightLabel", "Right label", "Us", false),
            copy_field("leftBody", "Left body", "Their side", true),
            copy_field("rightBody", "Right body", "Our side", true),
            copy_field("verdict", "Verdict", "Easy choice", false),
        ],
        thumbnail: None,
    }
}

/// Single big stat, 1080×1080.
fn stat1() -> LayoutTemplate {
    let canvas = Canvas {
        width: 1080,
        height: 1080,
    };
    LayoutTemplate {
        key: "stat1".to_string(),
        name: "Big stat".to_string(),
        description: "One oversized number with context lines".to_string(),
        category: "stat".to_string(),
        enabled: true,
        spec: LayoutSpecification {
            canvas,
            elements: vec![
                background("bg", "Background", canvas, ColorRole::Primary),
                with(
                    text(
                        "kicker",
                        "Kicker",
                        frame(120.0, 180.0, 840.0, 40.0, 1),
                        TextPreset::Overline,
                        ColorRole::Accent,
                        "kicker",
                        "Customers agree",
                    ),
                    |t| {
                        t.align = TextAlign::Center;
                        t.transform = TextTransform::Uppercase;
                    },
                ),
                with(
                    text(
                        "stat",
                        "Stat",
                        frame(120.0, 320.0, 840.0, 280.0, 1),
                        TextPreset::Display,
                        ColorRole::Background,
                        "stat",
                        "97%",
                    ),
                    |t| {
                        t.align = TextAlign::Center;
                        t.size = Some(220.0);
                    },
                ),
                with(
                    text(
                        "context",
                        "Context",
                        frame(180.0, 660.0, 720.0, 120.0, 1),
                        TextPreset::H2,
                        ColorRole::Background,
                        "context",
                        "would recommend us to a friend",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
                with(
                    text(
                        "source",
                        "Source",
                        frame(180.0, 880.0, 720.0, 40.0, 1),
                        TextPreset::Body,
                        ColorRole::TextSecondary,
                        "source",
                        "2025 customer survey, n=1,204",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
            ],
        },
        copy_schema: vec![
            copy_field("kicker", "Kicker", "Customers agree", false),
            copy_field("stat", "Stat", "97%", true),
            copy_field("context", "Context", "would recommend us", true),
            copy_field("source", "Source", "survey source", false),
        ],
        thumbnail: None,
    }
}

/// Product card, 1080×1350: image-led with name, price badge and CTA.
fn card1() -> LayoutTemplate {
    let canvas = Canvas {
        width: 1080,
        height: 1350,
    };
    LayoutTemplate {
        key: "card1".to_string(),
        name: "Product card".to_string(),
        description: "Portrait product card with price badge".to_string(),
        category: "card".to_string(),
        enabled: true,
        spec: LayoutSpecification {
            canvas,
            elements: vec![
                background("bg", "Background", canvas, ColorRole::Background),
                image(
                    "product",
                    "Product image",
                    frame(60.0, 60.0, 960.0, 820.0, 1),
                    "product",
                    ObjectFit::Cover,
                ),
                centered_container(
                    "priceBadge",
                    "Price badge",
                    frame(780.0, 800.0, 220.0, 80.0, 3),
                    ColorRole::Badge,
                    40.0,
                ),
                with(
                    text(
                        "price",
                        "Price",
                        frame(780.0, 800.0, 220.0, 80.0, 4),
                        TextPreset::Badge,
                        ColorRole::Text,
                        "price",
                        "$49",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
                text(
                    "name",
                    "Product name",
                    frame(60.0, 940.0, 960.0, 90.0, 2),
                    TextPreset::H1,
                    ColorRole::Primary,
                    "name",
                    "The essential",
                ),
                text(
                    "blurb",
                    "Blurb",
                    frame(60.0, 1050.0, 960.0, 120.0, 2),
                    TextPreset::Body,
                    ColorRole::TextSecondary,
                    "blurb",
                    "Everything you need, nothing you don't.",
                ),
                centered_container(
                    "ctaBox",
                    "CTA button",
                    frame(60.0, 1210.0, 300.0, 72.0, 3),
                    ColorRole::Accent,
                    36.0,
                ),
                with(
                    text(
                        "ctaLabel",
                        "CTA label",
                        frame(60.0, 1210.0, 300.0, 72.0, 4),
                        TextPreset::Cta,
                        ColorRole::Background,
                        "cta",
                        "Add to cart",
                    ),
                    |t| t.align = TextAlign::Center,
                ),
            ],
        },
        copy_schema: vec![
            copy_field("name", "Product name", "Product", true),
            copy_field("blurb", "Blurb", "One-line description", true),
            copy_field("price", "Price", "$49", false),
            copy_field("cta", "CTA label", "Add to cart", false),
        ],
        thumbnail: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/catalog.rs"]
mod tests;
