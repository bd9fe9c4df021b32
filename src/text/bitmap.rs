use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

use crate::text::style::FontWeight;
use crate::text::typeface::{GlyphMask, LineMetrics, PixelWindow, Typeface};

const CELL: u32 = 8;
const SUPERSAMPLE: u32 = 4;
// Row 7 of every font8x8 cell is the descender row.
const BASELINE_ROWS: f32 = 7.0;

/// Built-in face backed by the public-domain 8x8 glyphs of `font8x8`.
///
/// Glyphs are area-sampled to the requested size, so edges come out anti-aliased.
/// Each character occupies a square cell `font_size` pixels wide. Bold is synthesized by
/// smearing every glyph row one source column to the right.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapFace;

impl BitmapFace {
    pub fn new() -> Self {
        Self
    }

    fn glyph(ch: char, weight: FontWeight) -> [u8; 8] {
        let rows = BASIC_FONTS
            .get(ch)
            .or_else(|| LATIN_FONTS.get(ch))
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        match weight {
            FontWeight::Regular => rows,
            FontWeight::Bold => rows.map(|r| r | (r << 1)),
        }
    }
}

impl Typeface for BitmapFace {
    fn family(&self) -> &str {
        "font8x8"
    }

    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size
    }

    fn line_metrics(&self, font_size: f32) -> LineMetrics {
        LineMetrics {
            ascent: font_size * BASELINE_ROWS / CELL as f32,
            height: font_size,
        }
    }

    fn rasterize_window(
        &self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
        window: PixelWindow,
    ) -> GlyphMask {
        let ascent = self.line_metrics(font_size).ascent;
        let mut mask = GlyphMask::new(window.width, window.height, ascent - window.y as f32);
        if !(font_size.is_finite() && font_size > 0.0) || window.width == 0 || window.height == 0
        {
            return mask;
        }

        // Only the cells under the window are looked up, so long lines cost nothing off-screen.
        let em = f64::from(font_size);
        let first_cell = (window.x as f64 / em).floor().max(0.0) as usize;
        let cell_span = ((f64::from(window.width) / em).ceil() as usize).saturating_add(2);
        let glyphs: Vec<[u8; 8]> = text
            .chars()
            .skip(first_cell)
            .take(cell_span)
            .map(|c| Self::glyph(c, weight))
            .collect();
        if glyphs.is_empty() {
            return mask;
        }

        let step = 1.0 / f64::from(SUPERSAMPLE);
        let samples = SUPERSAMPLE * SUPERSAMPLE;
        let scale = f64::from(CELL) / em;
        let cell_px = f64::from(CELL);
        for j in 0..window.height {
            let y = window.y as f64 + f64::from(j);
            for i in 0..window.width {
                let x = window.x as f64 + f64::from(i);
                let mut hits = 0u32;
                for sy in 0..SUPERSAMPLE {
                    let py = (y + (f64::from(sy) + 0.5) * step) * scale;
                    if !(0.0..cell_px).contains(&py) {
                        continue;
                    }
                    let row = py as usize;
                    for sx in 0..SUPERSAMPLE {
                        let px = (x + (f64::from(sx) + 0.5) * step) * scale;
                        if px < 0.0 {
                            continue;
                        }
                        let Some(glyph) = ((px / cell_px) as usize)
                            .checked_sub(first_cell)
                            .and_then(|cell| glyphs.get(cell))
                        else {
                            continue;
                        };
                        let col = (px % cell_px) as usize;
                        if (glyph[row] >> col) & 1 == 1 {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    let value = ((hits * 255 + samples / 2) / samples) as u8;
                    mask.raise(i64::from(i), i64::from(j), value);
                }
            }
        }
        mask
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/bitmap.rs"]
mod tests;
