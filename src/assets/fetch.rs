use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{AdmatError, AdmatResult};
use crate::layout::spec::ObjectFit;

/// Source of raw image bytes for the capture path. The pipeline only ever
/// consumes resolved URLs; a fetcher turns one URL into bytes within a
/// bounded per-image timeout.
pub trait ImageFetcher: Send {
    fn fetch(&self, url: &str, timeout: Duration) -> AdmatResult<Vec<u8>>;
}

/// Default fetcher: `http(s)` URLs over a blocking client with an explicit
/// per-request timeout, anything else read as a filesystem path relative to
/// `root`.
pub struct AssetFetcher {
    client: reqwest::blocking::Client,
    root: PathBuf,
}

impl AssetFetcher {
    pub fn new(root: impl Into<PathBuf>) -> AdmatResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("build asset http client")?;
        Ok(Self {
            client,
            root: root.into(),
        })
    }
}

impl ImageFetcher for AssetFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> AdmatResult<Vec<u8>> {
        if url.starts_with("http://") || url.starts_with("https://") {
            let response = self
                .client
                .get(url)
                .timeout(timeout)
                .send()
                .map_err(|e| AdmatError::backend(format!("fetch image '{url}': {e}")))?;
            if !response.status().is_success() {
                return Err(AdmatError::backend(format!(
                    "fetch image '{url}': status {}",
                    response.status()
                )));
            }
            let bytes = response
                .bytes()
                .map_err(|e| AdmatError::backend(format!("read image body '{url}': {e}")))?;
            Ok(bytes.to_vec())
        } else {
            std::fs::read(self.root.join(url))
                .with_context(|| format!("read image file '{url}'"))
                .map_err(AdmatError::from)
        }
    }
}

/// Decode image bytes to premultiplied RGBA8 sized for a target box per the
/// element's object-fit mode, ready to paint with a plain rect fill.
pub fn prepare_for_box(
    bytes: &[u8],
    target_w: u32,
    target_h: u32,
    fit: ObjectFit,
) -> AdmatResult<vello_cpu::Image> {
    let decoded = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();

    let fitted: image::RgbaImage = match fit {
        ObjectFit::Fill => image::imageops::resize(
            &decoded,
            target_w,
            target_h,
            image::imageops::FilterType::Triangle,
        ),
        ObjectFit::Cover => {
            let (src_w, src_h) = decoded.dimensions();
            let scale = (target_w as f64 / src_w as f64).max(target_h as f64 / src_h as f64);
            let scaled_w = ((src_w as f64 * scale).round() as u32).max(target_w);
            let scaled_h = ((src_h as f64 * scale).round() as u32).max(target_h);
            let scaled = image::imageops::resize(
                &decoded,
                scaled_w,
                scaled_h,
                image::imageops::FilterType::Triangle,
            );
            image::imageops::crop_imm(
                &scaled,
                (scaled_w - target_w) / 2,
                (scaled_h - target_h) / 2,
                target_w,
                target_h,
            )
            .to_image()
        }
        ObjectFit::Contain => {
            let (src_w, src_h) = decoded.dimensions();
            let scale = (target_w as f64 / src_w as f64).min(target_h as f64 / src_h as f64);
            let scaled_w = ((src_w as f64 * scale).round() as u32).clamp(1, target_w);
            let scaled_h = ((src_h as f64 * scale).round() as u32).clamp(1, target_h);
            let scaled = image::imageops::resize(
                &decoded,
                scaled_w,
                scaled_h,
                image::imageops::FilterType::Triangle,
            );
            let mut padded = image::RgbaImage::new(target_w, target_h);
            image::imageops::overlay(
                &mut padded,
                &scaled,
                ((target_w - scaled_w) / 2) as i64,
                ((target_h - scaled_h) / 2) as i64,
            );
            padded
        }
    };

    let mut rgba = fitted.into_raw();
    premultiply_rgba8_in_place(&mut rgba);
    premul_bytes_to_image(&rgba, target_w, target_h)
}

/// Deterministic checkerboard synthesized for the reserved placeholder URL.
/// Two fixed grays, 16px squares, no randomness.
pub fn checkerboard_image(width: u32, height: u32) -> AdmatResult<vello_cpu::Image> {
    const CELL: u32 = 16;
    const LIGHT: [u8; 4] = [0xd4, 0xd4, 0xd0, 0xff];
    const DARK: [u8; 4] = [0xb8, 0xb8, 0xb2, 0xff];

    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let px = if ((x / CELL) + (y / CELL)) % 2 == 0 {
                LIGHT
            } else {
                DARK
            };
            rgba.extend_from_slice(&px);
        }
    }
    premul_bytes_to_image(&rgba, width, height)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn premul_bytes_to_image(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> AdmatResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AdmatError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AdmatError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(AdmatError::validation("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
