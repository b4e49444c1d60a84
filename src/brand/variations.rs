use crate::brand::model::{Brand, ColorRole, Palette};

/// A named role-remapping table layered temporarily over a brand's palette.
/// Stored brand data is never mutated; variations exist only for the duration
/// of one compose call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariation {
    pub name: String,
    /// (role, takes): `role` shows the color `takes` has in the base palette.
    pub remap: Vec<(ColorRole, ColorRole)>,
}

impl ColorVariation {
    pub fn identity() -> Self {
        Self {
            name: "Default".to_string(),
            remap: Vec::new(),
        }
    }

    fn named(name: &str, remap: &[(ColorRole, ColorRole)]) -> Self {
        Self {
            name: name.to_string(),
            remap: remap.to_vec(),
        }
    }

    pub fn apply(&self, palette: &Palette) -> Palette {
        palette.remapped(&self.remap)
    }
}

/// Curated variation sets per layout family, with a generic fallback for any
/// unlisted family. The identity "Default" variation is always first, and
/// variations whose remapped palette collapses to one already in the list
/// (palette-aware de-duplication) are dropped.
pub fn generate_variations(brand: &Brand, layout_key: &str) -> Vec<ColorVariation> {
    use ColorRole::*;

    let candidates: Vec<ColorVariation> = match layout_family(layout_key) {
        "hero" | "card" => vec![
            ColorVariation::identity(),
            ColorVariation::named("Inverted", &[(Background, Primary), (Text, Background), (TextSecondary, BackgroundAlt)]),
            ColorVariation::named("Accent wash", &[(Background, Accent), (Text, Background), (Primary, Background)]),
            ColorVariation::named("Soft", &[(Background, BackgroundAlt), (Primary, PrimarySoft)]),
        ],
        "compare" => vec![
            ColorVariation::identity(),
            ColorVariation::named("Swapped sides", &[(Primary, Accent), (Accent, Primary)]),
            ColorVariation::named("Muted loser", &[(Accent, TextSecondary)]),
            ColorVariation::named("Dark panel", &[(BackgroundAlt, Primary), (TextSecondary, Background)]),
        ],
        "stat" => vec![
            ColorVariation::identity(),
            ColorVariation::named("Accent stat", &[(Primary, Accent)]),
            ColorVariation::named("Positive", &[(Accent, Success)]),
            ColorVariation::named("Inverted", &[(Background, Primary), (Text, Background), (Primary, Background)]),
        ],
        "testimonial" => vec![
            ColorVariation::identity(),
            ColorVariation::named("Warm", &[(Background, PrimarySoft), (Text, Background)]),
            ColorVariation::named("Badge pop", &[(Accent, Badge)]),
        ],
        _ => vec![
            ColorVariation::identity(),
            ColorVariation::named("Inverted", &[(Background, Primary), (Text, Background)]),
            ColorVariation::named("Accent swap", &[(Primary, Accent), (Accent, Primary)]),
        ],
    };

    let mut seen: Vec<Palette> = Vec::new();
    let mut out = Vec::new();
    for variation in candidates {
        let palette = variation.apply(&brand.palette);
        if seen.contains(&palette) {
            continue;
        }
        seen.push(palette);
        out.push(variation);
    }
    out
}

/// Family of a layout key: the key with its trailing digits stripped
/// (`"compare1"` → `"compare"`).
fn layout_family(layout_key: &str) -> &str {
    layout_key.trim_end_matches(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "../../tests/unit/brand/variations.rs"]
mod tests;
