use kurbo::Affine;

use crate::compose::tree::{BoxPaint, RenderTree};

/// The single named capture-correction step.
///
/// The capture engine has two known rendering discrepancies; both are
/// compensated here, on a clone of the settled tree, so the workarounds stay
/// in one place and can be swapped out with the backend:
///
/// (a) vertically centered containers render their single-line text children
///     slightly high; force such children to an explicit line height equal
///     to the container's height and re-apply the centering on the child
///     itself;
/// (b) a residual transform left on the tree root (editor zoom/pan) doubles
///     up with per-box transforms during capture; strip it, unless a
///     rotated box genuinely requires the root transform to be honored.
pub fn apply_capture_corrections(tree: &RenderTree) -> RenderTree {
    let mut corrected = tree.clone();

    let centered_containers: Vec<_> = tree
        .boxes
        .iter()
        .filter_map(|b| match &b.paint {
            BoxPaint::Fill {
                centers_children: true,
                ..
            } => Some(b.frame),
            _ => None,
        })
        .collect();

    for draw_box in &mut corrected.boxes {
        let BoxPaint::Text {
            explicit_line_height,
            ..
        } = &mut draw_box.paint
        else {
            continue;
        };
        let Some(container) = centered_containers
            .iter()
            .find(|c| draw_box.frame.contained_in(c))
        else {
            continue;
        };
        *explicit_line_height = Some(container.height);
        draw_box.frame.y = container.y;
        draw_box.frame.height = container.height;
    }

    if corrected.root_transform != Affine::IDENTITY && !corrected.has_rotated_box() {
        tracing::debug!("stripping residual root transform before capture");
        corrected.root_transform = Affine::IDENTITY;
    }

    corrected
}

#[cfg(test)]
#[path = "../../tests/unit/raster/fixup.rs"]
mod tests;
