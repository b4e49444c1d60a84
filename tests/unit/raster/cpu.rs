use super::*;

use crate::compose::tree::DrawBox;
use crate::foundation::color::Rgba8;
use crate::foundation::geom::{Canvas, ElementFrame};
use crate::layout::spec::{ObjectFit, TextAlign};

fn fill(key: &str, frame: ElementFrame, color: Rgba8) -> DrawBox {
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

fn tree(canvas: Canvas, boxes: Vec<DrawBox>) -> RenderTree {
    RenderTree {
        layout_key: "hero1".to_string(),
        canvas,
        root_transform: Affine::IDENTITY,
        boxes,
    }
}

fn pixel(pixmap: &vello_cpu::Pixmap, x: u16, y: u16) -> [u8; 4] {
    let idx = (y as usize * pixmap.width() as usize + x as usize) * 4;
    pixmap.data_as_u8_slice()[idx..idx + 4].try_into().unwrap()
}

#[test]
fn rejects_degenerate_upscales() {
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    let tree = tree(canvas, vec![]);
    let mut fonts = FontBook::new();
    for upscale in [0.0, -1.0, f64::INFINITY] {
        assert!(rasterize(&tree, &CaptureAssets::default(), &mut fonts, upscale).is_err());
    }
}

#[test]
fn rejects_canvases_beyond_u16() {
    let tree = tree(
        Canvas {
            width: 70_000,
            height: 10,
        },
        vec![],
    );
    let mut fonts = FontBook::new();
    assert!(rasterize(&tree, &CaptureAssets::default(), &mut fonts, 1.0).is_err());
}

#[test]
fn background_fill_covers_the_canvas() {
    let canvas = Canvas {
        width: 12,
        height: 8,
    };
    let bg = Rgba8::rgb(10, 20, 30);
    let tree = tree(
        canvas,
        vec![fill("bg", ElementFrame::new(0.0, 0.0, 12.0, 8.0), bg)],
    );
    let mut fonts = FontBook::new();
    let pixmap = rasterize(&tree, &CaptureAssets::default(), &mut fonts, 1.0).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (12, 8));
    assert_eq!(pixel(&pixmap, 0, 0), [10, 20, 30, 255]);
    assert_eq!(pixel(&pixmap, 11, 7), [10, 20, 30, 255]);
}

#[test]
fn rounded_fills_leave_the_corners_unpainted() {
    let canvas = Canvas {
        width: 16,
        height: 16,
    };
    let mut rounded = fill(
        "card",
        ElementFrame::new(0.0, 0.0, 16.0, 16.0),
        Rgba8::rgb(200, 40, 40),
    );
    if let BoxPaint::Fill { corner_radius, .. } = &mut rounded.paint {
        *corner_radius = 6.0;
    }
    let mut fonts = FontBook::new();
    let pixmap = rasterize(
        &tree(canvas, vec![rounded]),
        &CaptureAssets::default(),
        &mut fonts,
        1.0,
    )
    .unwrap();
    // Corner pixel sits outside the 6px radius; the center is solid.
    assert_eq!(pixel(&pixmap, 0, 0)[3], 0);
    assert_eq!(pixel(&pixmap, 8, 8), [200, 40, 40, 255]);
}

#[test]
fn later_boxes_paint_over_earlier_ones() {
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    let tree = tree(
        canvas,
        vec![
            fill("under", ElementFrame::new(0.0, 0.0, 10.0, 10.0), Rgba8::rgb(255, 0, 0)),
            fill("over", ElementFrame::new(0.0, 0.0, 5.0, 10.0), Rgba8::rgb(0, 255, 0)),
        ],
    );
    let mut fonts = FontBook::new();
    let pixmap = rasterize(&tree, &CaptureAssets::default(), &mut fonts, 1.0).unwrap();
    assert_eq!(pixel(&pixmap, 1, 1), [0, 255, 0, 255]);
    assert_eq!(pixel(&pixmap, 8, 1), [255, 0, 0, 255]);
}

#[test]
fn upscale_multiplies_output_dimensions() {
    let canvas = Canvas {
        width: 10,
        height: 6,
    };
    let tree = tree(
        canvas,
        vec![fill("bg", ElementFrame::new(0.0, 0.0, 10.0, 6.0), Rgba8::rgb(1, 2, 3))],
    );
    let mut fonts = FontBook::new();
    let pixmap = rasterize(&tree, &CaptureAssets::default(), &mut fonts, 2.0).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (20, 12));
    assert_eq!(pixel(&pixmap, 19, 11), [1, 2, 3, 255]);
}

#[test]
fn unprepared_image_boxes_are_skipped() {
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    let mut boxes = vec![fill(
        "bg",
        ElementFrame::new(0.0, 0.0, 10.0, 10.0),
        Rgba8::rgb(9, 9, 9),
    )];
    boxes.push(DrawBox {
        key: "product".to_string(),
        frame: ElementFrame::new(0.0, 0.0, 10.0, 10.0),
        paint: BoxPaint::Image {
            url: "https://cdn.test/missing.png".to_string(),
            fit: ObjectFit::Cover,
            corner_radius: 0.0,
            opacity: 1.0,
            placeholder: false,
        },
        custom: false,
        selectable: false,
    });
    let mut fonts = FontBook::new();
    let pixmap = rasterize(&tree(canvas, boxes), &CaptureAssets::default(), &mut fonts, 1.0).unwrap();
    assert_eq!(pixel(&pixmap, 5, 5), [9, 9, 9, 255]);
}

#[test]
fn text_boxes_are_skipped_when_no_fonts_are_registered() {
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    let boxes = vec![
        fill("bg", ElementFrame::new(0.0, 0.0, 10.0, 10.0), Rgba8::rgb(5, 5, 5)),
        DrawBox {
            key: "headline".to_string(),
            frame: ElementFrame::new(0.0, 0.0, 10.0, 5.0),
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
        },
    ];
    let mut fonts = FontBook::new();
    let pixmap = rasterize(&tree(canvas, boxes), &CaptureAssets::default(), &mut fonts, 1.0).unwrap();
    assert_eq!(pixel(&pixmap, 2, 2), [5, 5, 5, 255]);
}
