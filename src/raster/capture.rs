use crate::assets::fetch::{ImageFetcher, checkerboard_image, prepare_for_box};
use crate::assets::fonts::FontBook;
use crate::compose::tree::{BoxPaint, RenderTree};
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::raster::cpu::{CaptureAssets, rasterize};
use crate::raster::encode::encode_pixmap;
use crate::raster::fixup::apply_capture_corrections;
use crate::raster::pipeline::RasterPolicy;

/// The fallback capture path: settle the visual tree (images fetched or
/// timed out, fonts ready), wait a short fixed settle delay, apply the
/// capture corrections to a clone, then rasterize and encode locally.
pub struct CaptureStage {
    fetcher: Box<dyn ImageFetcher>,
    fonts: FontBook,
}

impl CaptureStage {
    pub fn new(fetcher: Box<dyn ImageFetcher>, fonts: FontBook) -> Self {
        Self { fetcher, fonts }
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Capture one settled tree into encoded image bytes.
    ///
    /// Image readiness is cooperative: each image either loads, errors, or
    /// hits the bounded per-image timeout; an errored or timed-out image
    /// settles to the flagged placeholder rather than blocking or failing
    /// the capture.
    #[tracing::instrument(skip_all, fields(layout = tree.layout_key))]
    pub fn capture(&mut self, tree: &RenderTree, policy: &RasterPolicy) -> AdmatResult<Vec<u8>> {
        policy.validate().map_err(to_capture)?;

        let assets = self.settle_images(tree, policy);

        if self.fonts.is_empty() && tree.text_boxes().next().is_some() {
            tracing::warn!("capturing with an empty font book, text boxes will be skipped");
        } else if !self.fonts.ready_for(tree) {
            return Err(AdmatError::capture("fonts not ready for capture"));
        }

        // Covers layout/paint latency not observable through load signals.
        if !policy.settle_delay.is_zero() {
            std::thread::sleep(policy.settle_delay);
        }

        let corrected = apply_capture_corrections(tree);
        let pixmap =
            rasterize(&corrected, &assets, &mut self.fonts, policy.upscale).map_err(to_capture)?;
        encode_pixmap(&pixmap, policy.format, policy.quality).map_err(to_capture)
    }

    fn settle_images(&mut self, tree: &RenderTree, policy: &RasterPolicy) -> CaptureAssets {
        let mut assets = CaptureAssets::default();
        for draw_box in tree.image_boxes() {
            let BoxPaint::Image {
                url,
                fit,
                placeholder,
                ..
            } = &draw_box.paint
            else {
                continue;
            };
            let target_w = scaled(draw_box.frame.width, policy.upscale);
            let target_h = scaled(draw_box.frame.height, policy.upscale);

            let image = if *placeholder {
                checkerboard_image(target_w, target_h)
            } else {
                self.fetcher
                    .fetch(url, policy.image_wait)
                    .and_then(|bytes| prepare_for_box(&bytes, target_w, target_h, *fit))
                    .or_else(|err| {
                        tracing::warn!(
                            key = draw_box.key,
                            url,
                            error = %err,
                            "image failed to load within the wait bound, settling to placeholder"
                        );
                        checkerboard_image(target_w, target_h)
                    })
            };
            match image {
                Ok(image) => {
                    assets.images.insert(draw_box.key.clone(), image);
                }
                Err(err) => {
                    tracing::warn!(key = draw_box.key, error = %err, "could not prepare image box");
                }
            }
        }
        assets
    }
}

fn scaled(dim: f64, upscale: f64) -> u32 {
    ((dim * upscale).round() as u32).max(1)
}

fn to_capture(err: AdmatError) -> AdmatError {
    match err {
        err @ AdmatError::Capture(_) => err,
        other => AdmatError::capture(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/capture.rs"]
mod tests;
