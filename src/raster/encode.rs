use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{AdmatError, AdmatResult};

/// Selectable output encoding for the capture path.
///
/// PNG is lossless; JPEG is lossy with alpha flattened over white and a
/// 1–100 quality knob; WebP preserves alpha and is encoded losslessly (the
/// quality knob does not apply to it).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

/// Encode a rendered pixmap (premultiplied RGBA8) into the requested format.
pub fn encode_pixmap(
    pixmap: &vello_cpu::Pixmap,
    format: OutputFormat,
    quality: u8,
) -> AdmatResult<Vec<u8>> {
    let width = u32::from(pixmap.width());
    let height = u32::from(pixmap.height());
    let mut rgba = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);

    let mut out = Vec::new();
    match format {
        OutputFormat::Png => {
            let encoder = image::codecs::png::PngEncoder::new(Cursor::new(&mut out));
            image::ImageEncoder::write_image(
                encoder,
                &rgba,
                width,
                height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode png")?;
        }
        OutputFormat::Jpeg => {
            let rgb = flatten_over_white(&rgba);
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                Cursor::new(&mut out),
                quality.clamp(1, 100),
            );
            image::ImageEncoder::write_image(
                encoder,
                &rgb,
                width,
                height,
                image::ExtendedColorType::Rgb8,
            )
            .context("encode jpeg")?;
        }
        OutputFormat::Webp => {
            let encoder = image::codecs::webp::WebPEncoder::new_lossless(Cursor::new(&mut out));
            image::ImageEncoder::write_image(
                encoder,
                &rgba,
                width,
                height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode webp")?;
        }
    }

    if out.is_empty() {
        return Err(AdmatError::capture("encoder produced an empty payload"));
    }
    Ok(out)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

fn flatten_over_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = px[3] as u16;
        let blend = |c: u8| -> u8 { ((c as u16 * a + 255 * (255 - a) + 127) / 255) as u8 };
        rgb.push(blend(px[0]));
        rgb.push(blend(px[1]));
        rgb.push(blend(px[2]));
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/raster/encode.rs"]
mod tests;
