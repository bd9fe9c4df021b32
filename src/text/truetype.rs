use std::sync::Arc;

use fontdue::{Font, FontSettings};

use crate::foundation::error::{GifCapError, GifCapResult};
use crate::text::style::FontWeight;
use crate::text::typeface::{GlyphMask, LineMetrics, PixelWindow, Typeface};

const MAX_RASTER_EM: f32 = 1024.0;

/// Outline font loaded from caller-supplied TrueType/OpenType bytes.
///
/// The weight argument is ignored: load the bold cut of a family to get bold captions.
#[derive(Clone)]
pub struct TrueTypeFace {
    family: String,
    font: Arc<Font>,
}

impl TrueTypeFace {
    pub fn from_bytes(family: impl Into<String>, bytes: &[u8]) -> GifCapResult<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| GifCapError::validation(format!("failed to parse font: {e}")))?;
        Ok(Self {
            family: family.into(),
            font: Arc::new(font),
        })
    }

    fn vertical_metrics(&self, font_size: f32) -> (f32, f32) {
        match self.font.horizontal_line_metrics(font_size) {
            Some(m) => (m.ascent, m.descent),
            None => (font_size * 0.8, -font_size * 0.2),
        }
    }
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl Typeface for TrueTypeFace {
    fn family(&self) -> &str {
        &self.family
    }

    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn line_metrics(&self, font_size: f32) -> LineMetrics {
        let (ascent, descent) = self.vertical_metrics(font_size);
        LineMetrics {
            ascent,
            height: ascent - descent,
        }
    }

    fn rasterize_window(
        &self,
        text: &str,
        font_size: f32,
        _weight: FontWeight,
        window: PixelWindow,
    ) -> GlyphMask {
        let LineMetrics { ascent, .. } = self.line_metrics(font_size);
        let mut mask = GlyphMask::new(window.width, window.height, ascent - window.y as f32);
        if !(font_size.is_finite() && font_size > 0.0) || window.width == 0 || window.height == 0
        {
            return mask;
        }

        // Glyphs larger than MAX_RASTER_EM are sampled from a raster at that size.
        let raster_size = font_size.min(MAX_RASTER_EM);
        let scale = f64::from(font_size) / f64::from(raster_size);
        let (wx0, wy0) = (window.x as f64, window.y as f64);
        let (wx1, wy1) = (wx0 + f64::from(window.width), wy0 + f64::from(window.height));

        let mut pen = 0.0f64;
        for ch in text.chars() {
            if pen - f64::from(font_size) > wx1 {
                break;
            }
            let metrics = self.font.metrics(ch, font_size);
            let gx0 = (pen + f64::from(metrics.xmin)).round();
            let gy0 = (f64::from(ascent) - f64::from(metrics.height as i32 + metrics.ymin)).round();
            let (gx1, gy1) = (gx0 + metrics.width as f64, gy0 + metrics.height as f64);
            pen += f64::from(metrics.advance_width);

            let (x0, x1) = (gx0.max(wx0), gx1.min(wx1));
            let (y0, y1) = (gy0.max(wy0), gy1.min(wy1));
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            let (raster, bitmap) = self.font.rasterize(ch, raster_size);
            if raster.width == 0 || raster.height == 0 {
                continue;
            }
            for y in (y0 as i64)..(y1 as i64) {
                let sy = (((y as f64 - gy0 + 0.5) / scale) as usize).min(raster.height - 1);
                for x in (x0 as i64)..(x1 as i64) {
                    let sx = (((x as f64 - gx0 + 0.5) / scale) as usize).min(raster.width - 1);
                    let c = bitmap[sy * raster.width + sx];
                    if c > 0 {
                        mask.raise(x - window.x, y - window.y, c);
                    }
                }
            }
        }
        mask
    }
}
