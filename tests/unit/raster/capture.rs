use super::*;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use kurbo::Affine;

use crate::compose::tree::DrawBox;
use crate::foundation::color::Rgba8;
use crate::foundation::geom::{Canvas, ElementFrame};
use crate::layout::spec::{ObjectFit, TextAlign};
use crate::raster::encode::OutputFormat;

struct StubFetcher {
    response: Option<Vec<u8>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    fn ok(bytes: Vec<u8>) -> Self {
        Self {
            response: Some(bytes),
            calls: Arc::default(),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: Arc::default(),
        }
    }
}

impl ImageFetcher for StubFetcher {
    fn fetch(&self, url: &str, _timeout: Duration) -> AdmatResult<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.response
            .clone()
            .ok_or_else(|| AdmatError::backend("stub fetch failure"))
    }
}

fn png_of(px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba(px));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn fast_policy() -> RasterPolicy {
    RasterPolicy {
        settle_delay: Duration::ZERO,
        image_wait: Duration::from_millis(50),
        ..RasterPolicy::default()
    }
}

fn fill_box(key: &str, frame: ElementFrame, color: Rgba8) -> DrawBox {
    DrawBox {
        key: key.to_string(),
        frame,
        paint: BoxPaint::Fill {
            color,
            corner_radius: 0.0,
            centers_children: false,
        },
        custom: false,
        selectable: false,
    }
}

fn image_box(key: &str, frame: ElementFrame, url: &str, placeholder: bool) -> DrawBox {
    DrawBox {
        key: key.to_string(),
        frame,
        paint: BoxPaint::Image {
            url: url.to_string(),
            fit: ObjectFit::Fill,
            corner_radius: 0.0,
            opacity: if placeholder { 0.45 } else { 1.0 },
            placeholder,
        },
        custom: false,
        selectable: false,
    }
}

fn tree(boxes: Vec<DrawBox>) -> RenderTree {
    RenderTree {
        layout_key: "hero1".to_string(),
        canvas: Canvas {
            width: 32,
            height: 32,
        },
        root_transform: Affine::IDENTITY,
        boxes,
    }
}

#[test]
fn captures_a_fill_tree_to_decodable_png() {
    let mut stage = CaptureStage::new(Box::new(StubFetcher::failing()), FontBook::new());
    let tree = tree(vec![fill_box(
        "bg",
        ElementFrame::new(0.0, 0.0, 32.0, 32.0),
        Rgba8::rgb(40, 60, 80),
    )]);
    let bytes = stage.capture(&tree, &fast_policy()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (32, 32));
    assert_eq!(decoded.get_pixel(16, 16).0, [40, 60, 80, 255]);
}

#[test]
fn placeholder_boxes_never_hit_the_fetcher() {
    let fetcher = StubFetcher::ok(png_of([1, 2, 3, 255]));
    let calls = Arc::clone(&fetcher.calls);
    let mut stage = CaptureStage::new(Box::new(fetcher), FontBook::new());
    let tree = tree(vec![image_box(
        "product",
        ElementFrame::new(0.0, 0.0, 32.0, 32.0),
        crate::resolve::content::PLACEHOLDER_IMAGE_URL,
        true,
    )]);
    stage.capture(&tree, &fast_policy()).unwrap();
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn fetched_image_is_painted_into_the_output() {
    let mut stage = CaptureStage::new(
        Box::new(StubFetcher::ok(png_of([0, 255, 0, 255]))),
        FontBook::new(),
    );
    let tree = tree(vec![
        fill_box("bg", ElementFrame::new(0.0, 0.0, 32.0, 32.0), Rgba8::rgb(0, 0, 0)),
        image_box(
            "product",
            ElementFrame::new(8.0, 8.0, 16.0, 16.0),
            "https://cdn.test/shoe.png",
            false,
        ),
    ]);
    let bytes = stage.capture(&tree, &fast_policy()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(16, 16).0, [0, 255, 0, 255]);
    assert_eq!(decoded.get_pixel(2, 2).0, [0, 0, 0, 255]);
}

#[test]
fn failed_fetch_settles_to_the_checkerboard() {
    let mut stage = CaptureStage::new(Box::new(StubFetcher::failing()), FontBook::new());
    let tree = tree(vec![image_box(
        "product",
        ElementFrame::new(0.0, 0.0, 32.0, 32.0),
        "https://cdn.test/gone.png",
        false,
    )]);
    let bytes = stage.capture(&tree, &fast_policy()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    // Checkerboard light cell at the origin.
    assert_eq!(decoded.get_pixel(0, 0).0, [0xd4, 0xd4, 0xd0, 0xff]);
}

#[test]
fn empty_font_book_skips_text_instead_of_failing() {
    let mut stage = CaptureStage::new(Box::new(StubFetcher::failing()), FontBook::new());
    let mut boxes = vec![fill_box(
        "bg",
        ElementFrame::new(0.0, 0.0, 32.0, 32.0),
        Rgba8::rgb(7, 7, 7),
    )];
    boxes.push(DrawBox {
        key: "headline".to_string(),
        frame: ElementFrame::new(0.0, 0.0, 32.0, 16.0),
        paint: BoxPaint::Text {
            content: "Hi".to_string(),
            color: Rgba8::rgb(255, 255, 255),
            family: "Inter".to_string(),
            size: 12.0,
            weight: 400,
            line_height: 1.2,
            letter_spacing: 0.0,
            align: TextAlign::Left,
            explicit_line_height: None,
        },
        custom: false,
        selectable: false,
    });
    let bytes = stage.capture(&tree(boxes), &fast_policy()).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn invalid_policy_is_a_capture_error() {
    let mut stage = CaptureStage::new(Box::new(StubFetcher::failing()), FontBook::new());
    let policy = RasterPolicy {
        upscale: 0.0,
        ..fast_policy()
    };
    let err = stage.capture(&tree(vec![]), &policy).unwrap_err();
    assert!(matches!(err, AdmatError::Capture(_)));
}

#[test]
fn capture_respects_the_output_format() {
    let mut stage = CaptureStage::new(Box::new(StubFetcher::failing()), FontBook::new());
    let policy = RasterPolicy {
        format: OutputFormat::Jpeg,
        quality: 80,
        ..fast_policy()
    };
    let tree = tree(vec![fill_box(
        "bg",
        ElementFrame::new(0.0, 0.0, 32.0, 32.0),
        Rgba8::rgb(200, 10, 10),
    )]);
    let bytes = stage.capture(&tree, &policy).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
}

#[test]
fn error_wrapping_preserves_capture_errors() {
    let wrapped = to_capture(AdmatError::backend("boom"));
    assert!(matches!(&wrapped, AdmatError::Capture(msg) if msg.contains("boom")));
    let passthrough = to_capture(AdmatError::capture("already"));
    assert!(matches!(&passthrough, AdmatError::Capture(msg) if msg == "already"));
}
