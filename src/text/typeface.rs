use crate::text::style::FontWeight;

/// 8-bit coverage raster for one line of text.
///
/// `baseline` is the distance in pixels from the top row to the text baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub baseline: f32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn new(width: u32, height: u32, baseline: f32) -> Self {
        Self {
            width,
            height,
            baseline,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.coverage.iter().all(|&c| c == 0)
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// Raise the coverage at `(x, y)` to at least `value`; out-of-bounds writes are dropped.
    pub fn raise(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.coverage[idx] = self.coverage[idx].max(value);
    }
}

/// Vertical extent of a line box at one font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    pub height: f32,
}

/// Pixel rectangle in line-box coordinates.
///
/// `x` counts right from the pen start and `y` counts down from the top of the line box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelWindow {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Source of glyph metrics and coverage.
///
/// Implementations must be deterministic: the same text and size always produce the same mask.
pub trait Typeface: Send + Sync {
    fn family(&self) -> &str;

    /// Advance width of `text` in pixels at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> f32;

    fn line_metrics(&self, font_size: f32) -> LineMetrics;

    /// Rasterize the part of one line of text that falls inside `window`.
    ///
    /// The mask is exactly `window.width` by `window.height`, whatever the font size or text
    /// length, and its `baseline` is measured from the window's top row.
    fn rasterize_window(
        &self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
        window: PixelWindow,
    ) -> GlyphMask;

    /// Rasterize a whole line. The mask grows with the font size and the text length.
    fn rasterize(&self, text: &str, font_size: f32, weight: FontWeight) -> GlyphMask {
        let metrics = self.line_metrics(font_size);
        let window = PixelWindow {
            x: 0,
            y: 0,
            width: self.measure(text, font_size).ceil().max(0.0) as u32,
            height: metrics.height.ceil().max(0.0) as u32,
        };
        self.rasterize_window(text, font_size, weight, window)
    }
}
