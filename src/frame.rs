use image::RgbaImage;

use crate::foundation::core::Canvas;

/// One fully composited animation frame (straight-alpha RGBA8).
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub pixels: RgbaImage,
    pub delay_ms: u32,
}

impl Frame {
    pub fn new(pixels: RgbaImage, delay_ms: u32) -> Self {
        Self { pixels, delay_ms }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }
}

/// Sum of the per-frame delays in milliseconds.
pub fn total_duration_ms(frames: &[Frame]) -> u64 {
    frames.iter().map(|f| u64::from(f.delay_ms)).sum()
}
