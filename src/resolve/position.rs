use std::collections::BTreeMap;

use crate::foundation::geom::{ElementFrame, FrameOverride};

/// Global per-(layout, element) geometry overrides, shared by every instance
/// of a layout. The table is append-only and passed by value into
/// resolution; resolving never mutates it.
///
/// Wire shape: `masterOverrides[layoutKey][elementKey] = {x?, y?, ...}`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MasterOverrides {
    entries: BTreeMap<String, BTreeMap<String, FrameOverride>>,
}

impl MasterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, layout_key: &str, element_key: &str) -> Option<&FrameOverride> {
        self.entries
            .get(layout_key)
            .and_then(|elements| elements.get(element_key))
    }

    /// Record an override for (layout, element), merging field-wise over any
    /// existing record: later set fields win, unset fields keep their prior
    /// value.
    pub fn set(&mut self, layout_key: &str, element_key: &str, patch: FrameOverride) {
        let slot = self
            .entries
            .entry(layout_key.to_string())
            .or_default()
            .entry(element_key.to_string())
            .or_default();
        *slot = FrameOverride {
            x: patch.x.or(slot.x),
            y: patch.y.or(slot.y),
            width: patch.width.or(slot.width),
            height: patch.height.or(slot.height),
            rotation: patch.rotation.or(slot.rotation),
            z_index: patch.z_index.or(slot.z_index),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}

/// Resolve an element's final geometry.
///
/// Precedence (low → high): specification default < master override <
/// instance override. Each tier replaces only the fields it explicitly sets;
/// in particular a tier that overrides `x`/`width` leaves `zIndex` falling
/// through to the tier below. Always produces a new value.
pub fn resolve_position(
    spec_default: ElementFrame,
    master: Option<&FrameOverride>,
    instance: Option<&FrameOverride>,
) -> ElementFrame {
    let mut resolved = spec_default;
    for tier in [master, instance].into_iter().flatten() {
        resolved = tier.apply_to(resolved);
    }
    resolved
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/position.rs"]
mod tests;
