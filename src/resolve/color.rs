use std::collections::BTreeMap;

use crate::brand::model::{ColorRole, Palette};
use crate::foundation::color::Rgba8;

/// Resolve the final color for one visible field of a layout.
///
/// Instance color overrides are keyed by the human-readable field *label*
/// (not the element key) and name a color *role*, which is then looked up in
/// the brand's role table. Resolution sources, in order:
///
/// 1. `overrides[layout_key][field_label]`, parsed as a role name
/// 2. terminal default: `default_role`
///
/// An override naming an unknown role fails closed to the default role's
/// color; a render never contains a missing color, and resolution never
/// fails.
pub fn resolve_color(
    palette: &Palette,
    overrides: &BTreeMap<String, BTreeMap<String, String>>,
    layout_key: &str,
    field_label: &str,
    default_role: ColorRole,
) -> Rgba8 {
    let overridden = overrides
        .get(layout_key)
        .and_then(|fields| fields.get(field_label))
        .map(String::as_str);

    resolve_role_name(palette, overridden, default_role)
}

/// Shared fail-closed role-name resolution, also used for custom-element
/// color keys (where the "override" comes from the element's own style or a
/// `customElementContent` record instead of the label-keyed map).
pub fn resolve_role_name(
    palette: &Palette,
    role_name: Option<&str>,
    default_role: ColorRole,
) -> Rgba8 {
    let role = match role_name {
        Some(name) => match ColorRole::parse_loose(name) {
            Some(role) => role,
            None => {
                tracing::debug!(role = name, fallback = default_role.as_str(), "unknown color role in override, failing closed to default");
                default_role
            }
        },
        None => default_role,
    };
    palette.color(role)
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/color.rs"]
mod tests;
