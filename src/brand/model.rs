use std::collections::BTreeMap;

use crate::assets::library::DamCredentials;
use crate::foundation::color::Rgba8;

/// The ten semantic color roles every brand defines.
///
/// Roles are a closed set: layouts bind to roles, never to literal colors,
/// so swapping a brand's palette restyles every layout at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorRole {
    Background,
    BackgroundAlt,
    Primary,
    PrimarySoft,
    Accent,
    Text,
    TextSecondary,
    Badge,
    Success,
    Error,
}

impl ColorRole {
    pub const ALL: [ColorRole; 10] = [
        ColorRole::Background,
        ColorRole::BackgroundAlt,
        ColorRole::Primary,
        ColorRole::PrimarySoft,
        ColorRole::Accent,
        ColorRole::Text,
        ColorRole::TextSecondary,
        ColorRole::Badge,
        ColorRole::Success,
        ColorRole::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::BackgroundAlt => "background-alt",
            ColorRole::Primary => "primary",
            ColorRole::PrimarySoft => "primary-soft",
            ColorRole::Accent => "accent",
            ColorRole::Text => "text",
            ColorRole::TextSecondary => "text-secondary",
            ColorRole::Badge => "badge",
            ColorRole::Success => "success",
            ColorRole::Error => "error",
        }
    }

    /// Tolerant parser for role names coming out of stored override maps:
    /// case-insensitive and indifferent to `-`/`_`/space separators
    /// (`"backgroundAlt"`, `"background_alt"` and `"background-alt"` all
    /// resolve). Returns `None` for anything that is not a known role.
    pub fn parse_loose(s: &str) -> Option<ColorRole> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL.iter().copied().find(|role| {
            role.as_str()
                .chars()
                .filter(|c| *c != '-')
                .eq(folded.chars())
        })
    }
}

/// A brand's role table: every role always has a color (total struct), so
/// role lookup can never come back empty.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Palette {
    pub background: Rgba8,
    pub background_alt: Rgba8,
    pub primary: Rgba8,
    pub primary_soft: Rgba8,
    pub accent: Rgba8,
    pub text: Rgba8,
    pub text_secondary: Rgba8,
    pub badge: Rgba8,
    pub success: Rgba8,
    pub error: Rgba8,
}

impl Palette {
    pub fn color(&self, role: ColorRole) -> Rgba8 {
        match role {
            ColorRole::Background => self.background,
            ColorRole::BackgroundAlt => self.background_alt,
            ColorRole::Primary => self.primary,
            ColorRole::PrimarySoft => self.primary_soft,
            ColorRole::Accent => self.accent,
            ColorRole::Text => self.text,
            ColorRole::TextSecondary => self.text_secondary,
            ColorRole::Badge => self.badge,
            ColorRole::Success => self.success,
            ColorRole::Error => self.error,
        }
    }

    fn set(&mut self, role: ColorRole, color: Rgba8) {
        match role {
            ColorRole::Background => self.background = color,
            ColorRole::BackgroundAlt => self.background_alt = color,
            ColorRole::Primary => self.primary = color,
            ColorRole::PrimarySoft => self.primary_soft = color,
            ColorRole::Accent => self.accent = color,
            ColorRole::Text => self.text = color,
            ColorRole::TextSecondary => self.text_secondary = color,
            ColorRole::Badge => self.badge = color,
            ColorRole::Success => self.success = color,
            ColorRole::Error => self.error = color,
        }
    }

    /// Produce a new palette where each remapped role takes the color the
    /// *source* role has in `self`. All remap entries read from the original
    /// palette, so swaps (primary↔accent) behave as expected.
    pub fn remapped(&self, remap: &[(ColorRole, ColorRole)]) -> Palette {
        let mut out = self.clone();
        for &(role, takes) in remap {
            out.set(role, self.color(takes));
        }
        out
    }
}

impl Default for Palette {
    fn default() -> Self {
        // Neutral starter scheme shown for freshly created brands.
        Self {
            background: Rgba8::rgb(0xf7, 0xf6, 0xf2),
            background_alt: Rgba8::rgb(0xec, 0xea, 0xe3),
            primary: Rgba8::rgb(0x16, 0x17, 0x16),
            primary_soft: Rgba8::rgb(0x3a, 0x3c, 0x3a),
            accent: Rgba8::rgb(0xc8, 0x5c, 0x2e),
            text: Rgba8::rgb(0x1c, 0x1c, 0x1a),
            text_secondary: Rgba8::rgb(0x6b, 0x6b, 0x66),
            badge: Rgba8::rgb(0xe8, 0xd9, 0x4a),
            success: Rgba8::rgb(0x2e, 0x7d, 0x4f),
            error: Rgba8::rgb(0xb0, 0x2e, 0x2e),
        }
    }
}

/// Named typography presets a brand defines once and layouts reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPreset {
    Display,
    H1,
    H2,
    Body,
    Overline,
    Cta,
    Badge,
}

/// Concrete text styling carried by one preset. `size` and `letter_spacing`
/// are CSS pixels, `line_height` is a multiplier of the font size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub size: f64,
    pub weight: u16,
    pub line_height: f64,
    pub letter_spacing: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub family: String,
    pub display: TypeStyle,
    pub h1: TypeStyle,
    pub h2: TypeStyle,
    pub body: TypeStyle,
    pub overline: TypeStyle,
    pub cta: TypeStyle,
    pub badge: TypeStyle,
}

impl Typography {
    pub fn preset(&self, preset: TextPreset) -> TypeStyle {
        match preset {
            TextPreset::Display => self.display,
            TextPreset::H1 => self.h1,
            TextPreset::H2 => self.h2,
            TextPreset::Body => self.body,
            TextPreset::Overline => self.overline,
            TextPreset::Cta => self.cta,
            TextPreset::Badge => self.badge,
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        let style = |size: f64, weight: u16, line_height: f64, letter_spacing: f64| TypeStyle {
            size,
            weight,
            line_height,
            letter_spacing,
        };
        Self {
            family: "Inter".to_string(),
            display: style(88.0, 800, 1.02, -1.5),
            h1: style(56.0, 700, 1.08, -0.8),
            h2: style(36.0, 600, 1.15, -0.3),
            body: style(22.0, 400, 1.4, 0.0),
            overline: style(15.0, 600, 1.2, 2.2),
            cta: style(24.0, 700, 1.1, 0.2),
            badge: style(18.0, 700, 1.0, 0.6),
        }
    }
}

/// One brand: the visual identity shared by every SKU under it.
/// Last-write-wins, no per-brand versioning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub typography: Typography,
    /// image-role → asset URL
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_credentials: Option<DamCredentials>,
}

impl Brand {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            palette: Palette::default(),
            typography: Typography::default(),
            images: BTreeMap::new(),
            voice: None,
            knowledge: None,
            dam_credentials: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brand/model.rs"]
mod tests;
