use super::*;
use crate::text::bitmap::BitmapFace;
use crate::text::color::Color;
use crate::text::style::CaptionStyle;

const LONG: &str = "A VERY LONG SENTENCE THAT MUST WRAP ACROSS MULTIPLE LINES";

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn solid_frame(w: u32, h: u32, rgba: [u8; 4], delay_ms: u32) -> Frame {
    Frame::new(RgbaImage::from_pixel(w, h, image::Rgba(rgba)), delay_ms)
}

#[test]
fn hello_fits_on_one_line_and_long_caption_wraps() {
    let face = BitmapFace::new();
    let hello = CaptionOptions::new("HELLO")
        .with_style(CaptionStyle::Classic)
        .with_position(CaptionPosition::Bottom);
    let long = CaptionOptions::new(LONG)
        .with_style(CaptionStyle::Classic)
        .with_position(CaptionPosition::Bottom);

    let a = layout_caption(canvas(400, 300), &hello, &face).unwrap();
    let b = layout_caption(canvas(400, 300), &long, &face).unwrap();
    assert_eq!(a.lines.len(), 1);
    assert!(b.lines.len() >= 3, "{:?}", b.lines);
    assert!(b.font_size <= a.font_size);
}

#[test]
fn bottom_position_puts_last_baseline_at_padding() {
    let face = BitmapFace::new();
    let opts = CaptionOptions::new(LONG).with_padding(12.0);
    let layout = layout_caption(canvas(400, 300), &opts, &face).unwrap();
    let last = layout.lines.last().unwrap();
    assert!((last.origin.y - (300.0 - 12.0)).abs() < 1e-3);
}

#[test]
fn top_position_starts_block_at_padding() {
    let face = BitmapFace::new();
    let opts = CaptionOptions::new("hi there")
        .with_position(CaptionPosition::Top)
        .with_padding(7.0);
    let layout = layout_caption(canvas(200, 200), &opts, &face).unwrap();
    assert!((layout.block_top - 7.0).abs() < 1e-6);
    let first = &layout.lines[0];
    assert!((first.origin.y - f64::from(7.0 + layout.font_size)).abs() < 1e-3);
}

#[test]
fn center_position_centers_block() {
    let face = BitmapFace::new();
    let opts = CaptionOptions::new(LONG).with_position(CaptionPosition::Center);
    let layout = layout_caption(canvas(400, 300), &opts, &face).unwrap();
    let mid = layout.block_top + layout.block_height() / 2.0;
    assert!((mid - 150.0).abs() < 1e-3);
}

#[test]
fn lines_are_horizontally_centered() {
    let face = BitmapFace::new();
    let opts = CaptionOptions::new(LONG);
    let layout = layout_caption(canvas(400, 300), &opts, &face).unwrap();
    for line in &layout.lines {
        let left = line.origin.x;
        let right = 400.0 - (left + f64::from(line.width));
        assert!((left - right).abs() < 1e-3, "{line:?}");
    }
}

#[test]
fn line_spacing_follows_preset_multiplier() {
    let face = BitmapFace::new();
    let opts = CaptionOptions::new(LONG).with_font_size(20.0);
    let layout = layout_caption(canvas(400, 300), &opts, &face).unwrap();
    assert!((layout.line_height - 24.0).abs() < 1e-4);
    for pair in layout.lines.windows(2) {
        assert!((pair[1].origin.y - pair[0].origin.y - 24.0).abs() < 1e-3);
    }
}

#[test]
fn empty_text_returns_identical_frame() {
    let face = BitmapFace::new();
    let frame = solid_frame(64, 48, [10, 20, 30, 255], 70);
    let out = overlay_text_on_frame(&frame, &CaptionOptions::new(""), &face).unwrap();
    assert_eq!(out.width(), 64);
    assert_eq!(out.height(), 48);
    assert_eq!(out, frame);
}

#[test]
fn classic_caption_draws_white_fill_and_black_outline() {
    let face = BitmapFace::new();
    let frame = solid_frame(200, 120, [0, 128, 0, 255], 40);
    let opts = CaptionOptions::new("HI").with_font_size(32.0);
    let out = overlay_text_on_frame(&frame, &opts, &face).unwrap();

    assert_eq!(out.delay_ms, 40);
    assert_eq!(out.canvas(), frame.canvas());
    let white = out.pixels.pixels().filter(|p| p.0 == [255, 255, 255, 255]).count();
    let black = out.pixels.pixels().filter(|p| p.0 == [0, 0, 0, 255]).count();
    assert!(white > 0);
    assert!(black > 0);
    // Only the bottom band is touched.
    assert_eq!(out.pixels.get_pixel(100, 5).0, [0, 128, 0, 255]);
}

#[test]
fn modern_caption_casts_shadow_without_outline() {
    let face = BitmapFace::new();
    let frame = solid_frame(200, 120, [255, 255, 255, 255], 10);
    let opts = CaptionOptions::new("Hi")
        .with_style(CaptionStyle::Modern)
        .with_font_size(32.0)
        .with_position(CaptionPosition::Center);
    let renderer = CaptionRenderer::new(frame.canvas(), &opts, &face).unwrap();
    let out = renderer.render(&frame).unwrap();

    // White text on white: only the shadow darkens anything.
    let darkened = out.pixels.pixels().filter(|p| p.0[0] < 250).count();
    assert!(darkened > 0);
    assert!(out.pixels.pixels().all(|p| p.0[3] == 255));
    assert!(out.pixels.pixels().all(|p| p.0 != [0, 0, 0, 255]));
}

#[test]
fn explicit_colors_override_preset() {
    let face = BitmapFace::new();
    let frame = solid_frame(160, 100, [0, 0, 0, 255], 10);
    let opts = CaptionOptions {
        text_color: Some(Color::rgba(1.0, 0.0, 0.0, 1.0)),
        stroke_width: Some(0.0),
        font_size: Some(24.0),
        ..CaptionOptions::new("X")
    };
    let out = overlay_text_on_frame(&frame, &opts, &face).unwrap();
    assert!(out.pixels.pixels().any(|p| p.0 == [255, 0, 0, 255]));
    assert!(out.pixels.pixels().all(|p| p.0[1] == 0 && p.0[2] == 0));
}

#[test]
fn input_frame_is_not_mutated() {
    let face = BitmapFace::new();
    let frame = solid_frame(120, 80, [5, 5, 5, 255], 10);
    let before = frame.clone();
    let _ = overlay_text_on_frame(&frame, &CaptionOptions::new("MUTATE?"), &face).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn renderer_rejects_frames_of_another_size() {
    let face = BitmapFace::new();
    let renderer =
        CaptionRenderer::new(canvas(100, 100), &CaptionOptions::new("x"), &face).unwrap();
    let err = renderer
        .render(&solid_frame(50, 50, [0, 0, 0, 255], 10))
        .unwrap_err();
    assert!(matches!(err, GifCapError::Validation(_)));
}

#[test]
fn invalid_options_fail_before_drawing() {
    let face = BitmapFace::new();
    let frame = solid_frame(10, 10, [0, 0, 0, 255], 10);
    let opts = CaptionOptions::new("x").with_padding(f32::INFINITY);
    assert!(overlay_text_on_frame(&frame, &opts, &face).is_err());
}

#[test]
fn extreme_padding_never_overflows_placement() {
    let face = BitmapFace::new();
    let frame = solid_frame(100, 100, [0, 0, 255, 255], 10);
    for position in [
        CaptionPosition::Top,
        CaptionPosition::Bottom,
        CaptionPosition::Center,
    ] {
        for padding in [1.0e20, f32::MAX] {
            let opts = CaptionOptions::new("HELLO")
                .with_position(position)
                .with_padding(padding);
            let out = overlay_text_on_frame(&frame, &opts, &face).unwrap();
            assert_eq!(out.canvas(), frame.canvas(), "{position:?} {padding}");
            if position != CaptionPosition::Center {
                // The block is pushed wholly off the canvas.
                assert_eq!(out, frame, "{position:?} {padding}");
            }
        }
    }
}

#[test]
fn huge_font_size_renders_only_the_visible_part() {
    let face = BitmapFace::new();
    let frame = solid_frame(100, 100, [0, 0, 255, 255], 10);
    for font_size in [1.0e6, 1.0e30, f32::MAX] {
        for position in [CaptionPosition::Bottom, CaptionPosition::Center] {
            let opts = CaptionOptions::new("HELLO")
                .with_font_size(font_size)
                .with_position(position);
            let renderer = CaptionRenderer::new(frame.canvas(), &opts, &face).unwrap();
            for pass in &renderer.passes {
                assert!(pass.mask.width <= 1_000 && pass.mask.height <= 1_000);
            }
            let out = renderer.render(&frame).unwrap();
            assert_eq!(out.canvas(), frame.canvas());
        }
    }
}

#[test]
fn oversized_stroke_is_bounded_by_the_canvas() {
    let face = BitmapFace::new();
    let frame = solid_frame(24, 24, [0, 128, 0, 255], 10);
    let opts = CaptionOptions {
        font_size: Some(16.0),
        stroke_width: Some(1.0e20),
        position: CaptionPosition::Center,
        ..CaptionOptions::new("I")
    };
    let renderer = CaptionRenderer::new(frame.canvas(), &opts, &face).unwrap();
    assert!(renderer.passes.iter().all(|p| p.mask.width <= 200));
    let out = renderer.render(&frame).unwrap();
    // The outline swallows the whole frame.
    assert!(out.pixels.pixels().all(|p| p.0 != [0, 128, 0, 255]));
}

#[test]
fn line_wider_than_canvas_is_clipped_not_dropped() {
    let face = BitmapFace::new();
    let frame = solid_frame(60, 60, [0, 128, 0, 255], 10);
    let opts = CaptionOptions::new("WWWWWWWWWW")
        .with_font_size(30.0)
        .with_position(CaptionPosition::Center);
    let renderer = CaptionRenderer::new(frame.canvas(), &opts, &face).unwrap();
    let out = renderer.render(&frame).unwrap();
    assert!(out.pixels.pixels().any(|p| p.0 == [255, 255, 255, 255]));
    assert!(out.pixels.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    for pass in &renderer.passes {
        assert!(pass.mask.width < 300, "{}", pass.mask.width);
    }
}
