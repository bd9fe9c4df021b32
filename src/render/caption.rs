use image::RgbaImage;

use crate::foundation::core::{Canvas, Point, Rgba8Premul, Vec2};
use crate::foundation::core::{premultiply_in_place, unpremultiply_in_place};
use crate::foundation::error::{GifCapError, GifCapResult};
use crate::frame::Frame;
use crate::render::blur::{blur_mask, blur_radius};
use crate::render::composite::paint_mask;
use crate::render::mask::{dilate, pad};
use crate::text::options::{CaptionOptions, ResolvedStyle};
use crate::text::sizing::calculate_font_size;
use crate::text::style::{CaptionPosition, Shadow};
use crate::text::typeface::{GlyphMask, LineMetrics, PixelWindow, Typeface};
use crate::text::wrap::wrap_text;

/// One wrapped caption line. `origin` is the left end of its baseline in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    pub text: String,
    pub width: f32,
    pub origin: Point,
}

/// Where every line of a caption lands on a canvas of a given size.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    pub font_size: f32,
    pub line_height: f32,
    /// Top of the first line's em box.
    pub block_top: f32,
    pub lines: Vec<LineLayout>,
}

impl CaptionLayout {
    /// Height from the first em-box top to the last baseline.
    pub fn block_height(&self) -> f32 {
        block_height(self.lines.len(), self.line_height, self.font_size)
    }
}

fn block_height(lines: usize, line_height: f32, font_size: f32) -> f32 {
    lines.saturating_sub(1) as f32 * line_height + font_size
}

/// Compute the caption layout for `options` on `canvas` without drawing anything.
pub fn layout_caption(
    canvas: Canvas,
    options: &CaptionOptions,
    face: &dyn Typeface,
) -> GifCapResult<CaptionLayout> {
    let style = options.resolve()?;
    Ok(layout_resolved(canvas, options, &style, face))
}

fn layout_resolved(
    canvas: Canvas,
    options: &CaptionOptions,
    style: &ResolvedStyle,
    face: &dyn Typeface,
) -> CaptionLayout {
    let width = canvas.width as f32;
    let height = canvas.height as f32;

    let font_size = options
        .font_size
        .unwrap_or_else(|| calculate_font_size(canvas.width, &style.display_text, options.style));
    let max_width = (width - 2.0 * style.padding).max(0.0);
    let texts = wrap_text(
        &style.display_text,
        |s| face.measure(s, font_size),
        max_width,
    );
    let line_height = font_size * style.preset.line_height;
    let block = block_height(texts.len(), line_height, font_size);

    let block_top = match options.position {
        CaptionPosition::Top => style.padding,
        CaptionPosition::Bottom => height - style.padding - block,
        CaptionPosition::Center => (height - block) / 2.0,
    };

    let lines = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let line_width = face.measure(&text, font_size);
            let baseline = block_top + i as f32 * line_height + font_size;
            LineLayout {
                origin: Point::new(
                    f64::from((width - line_width) / 2.0),
                    f64::from(baseline),
                ),
                width: line_width,
                text,
            }
        })
        .collect();

    CaptionLayout {
        font_size,
        line_height,
        block_top,
        lines,
    }
}

/// A mask painted in one color at a fixed canvas position.
#[derive(Clone, Debug)]
struct Pass {
    mask: GlyphMask,
    left: i64,
    top: i64,
    color: Rgba8Premul,
}

/// Caption painter for a fixed canvas size.
///
/// Layout and glyph rasterization happen once in [`CaptionRenderer::new`]; [`render`] only
/// composites the prepared passes, so one renderer serves every frame of an animation.
///
/// [`render`]: CaptionRenderer::render
#[derive(Clone, Debug)]
pub struct CaptionRenderer {
    canvas: Canvas,
    layout: CaptionLayout,
    passes: Vec<Pass>,
}

impl CaptionRenderer {
    pub fn new(
        canvas: Canvas,
        options: &CaptionOptions,
        face: &dyn Typeface,
    ) -> GifCapResult<Self> {
        let style = options.resolve()?;
        let layout = layout_resolved(canvas, options, &style, face);
        let metrics = face.line_metrics(layout.font_size);

        // An outline wider than the canvas already covers all of it.
        let stroke_radius =
            (style.stroke_width / 2.0).min(canvas.width.max(canvas.height) as f32);
        let stroke_pad = if stroke_radius > 0.0 {
            stroke_radius.ceil() as i64
        } else {
            0
        };
        let shadow_reach = style.shadow.map_or(0, |s| {
            let Vec2 { x, y } = s.offset;
            i64::from(blur_radius(s.blur / 2.0)) + x.abs().max(y.abs()).ceil() as i64
        });
        let margin = stroke_pad + shadow_reach;

        let mut passes = Vec::new();
        for line in &layout.lines {
            let Some(visible) = visible_part(canvas, line, metrics, margin) else {
                continue;
            };
            let fill = face.rasterize_window(
                &line.text,
                layout.font_size,
                style.preset.weight,
                visible.window,
            );
            if fill.is_empty() {
                continue;
            }
            let (left, top) = (visible.left, visible.top);

            // Stroke under fill, each preceded by its own shadow when the style casts one.
            if stroke_pad > 0 {
                let stroke = dilate(&fill, stroke_radius);
                let (sl, st) = (left - stroke_pad, top - stroke_pad);
                if let Some(shadow) = style.shadow {
                    passes.push(shadow_pass(&stroke, sl, st, &shadow)?);
                }
                passes.push(Pass {
                    mask: stroke,
                    left: sl,
                    top: st,
                    color: style.stroke_color.to_rgba8_premul(),
                });
            }
            if let Some(shadow) = style.shadow {
                passes.push(shadow_pass(&fill, left, top, &shadow)?);
            }
            passes.push(Pass {
                mask: fill,
                left,
                top,
                color: style.text_color.to_rgba8_premul(),
            });
        }

        tracing::debug!(
            lines = layout.lines.len(),
            font_size = layout.font_size,
            passes = passes.len(),
            "caption prepared"
        );
        Ok(Self {
            canvas,
            layout,
            passes,
        })
    }

    pub fn layout(&self) -> &CaptionLayout {
        &self.layout
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Return a new frame with the caption burned in. The input frame is left untouched.
    pub fn render(&self, frame: &Frame) -> GifCapResult<Frame> {
        if frame.canvas() != self.canvas {
            return Err(GifCapError::validation(format!(
                "frame is {}x{} but the caption was laid out for {}x{}",
                frame.width(),
                frame.height(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        if self.passes.is_empty() {
            return Ok(frame.clone());
        }

        let mut data = frame.pixels.as_raw().clone();
        premultiply_in_place(&mut data);
        for pass in &self.passes {
            paint_mask(
                &mut data,
                self.canvas,
                &pass.mask,
                pass.left,
                pass.top,
                pass.color,
            )?;
        }
        unpremultiply_in_place(&mut data);

        let pixels = RgbaImage::from_raw(self.canvas.width, self.canvas.height, data)
            .ok_or_else(|| GifCapError::validation("caption buffer does not match canvas"))?;
        Ok(Frame::new(pixels, frame.delay_ms))
    }
}

/// The part of a line box that can put ink on the canvas.
struct VisiblePart {
    /// Canvas position of the window's top-left corner.
    left: i64,
    top: i64,
    window: PixelWindow,
}

/// Intersect the line box with the canvas grown by `margin` on every side.
///
/// Returns `None` when the line lies wholly outside, including lines pushed to non-finite
/// coordinates by extreme padding or font sizes.
fn visible_part(
    canvas: Canvas,
    line: &LineLayout,
    metrics: LineMetrics,
    margin: i64,
) -> Option<VisiblePart> {
    let box_left = line.origin.x.round();
    let box_top = (line.origin.y - f64::from(metrics.ascent)).round();
    if !(box_left.is_finite() && box_top.is_finite()) {
        return None;
    }
    let m = margin as f64;
    let x0 = box_left.max(-m);
    let y0 = box_top.max(-m);
    let x1 = (box_left + f64::from(line.width).ceil()).min(f64::from(canvas.width) + m);
    let y1 = (box_top + f64::from(metrics.height).ceil()).min(f64::from(canvas.height) + m);
    if !(x1 > x0 && y1 > y0) {
        return None;
    }
    Some(VisiblePart {
        left: x0 as i64,
        top: y0 as i64,
        window: PixelWindow {
            x: (x0 - box_left) as i64,
            y: (y0 - box_top) as i64,
            width: (x1 - x0).ceil() as u32,
            height: (y1 - y0).ceil() as u32,
        },
    })
}

fn shadow_pass(mask: &GlyphMask, left: i64, top: i64, shadow: &Shadow) -> GifCapResult<Pass> {
    let sigma = shadow.blur / 2.0;
    let spread = blur_radius(sigma);
    let blurred = blur_mask(&pad(mask, spread), sigma)?;
    let Vec2 { x: dx, y: dy } = shadow.offset;
    Ok(Pass {
        mask: blurred,
        left: left
            .saturating_sub(i64::from(spread))
            .saturating_add(dx.round() as i64),
        top: top
            .saturating_sub(i64::from(spread))
            .saturating_add(dy.round() as i64),
        color: shadow.color.to_rgba8_premul(),
    })
}

/// Burn `options` into a single frame.
pub fn overlay_text_on_frame(
    frame: &Frame,
    options: &CaptionOptions,
    face: &dyn Typeface,
) -> GifCapResult<Frame> {
    CaptionRenderer::new(frame.canvas(), options, face)?.render(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
