use image::RgbaImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{GifCapError, GifCapResult};
use crate::frame::Frame;
use crate::render::composite::over_straight;

/// What happens to the canvas after a frame has been shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposal {
    /// No instruction; treated like [`Disposal::Keep`].
    #[default]
    Unspecified,
    Keep,
    /// Clear the canvas to transparent.
    Background,
    /// Restore the canvas to how it looked before the frame was drawn.
    Previous,
}

impl From<gif::DisposalMethod> for Disposal {
    fn from(value: gif::DisposalMethod) -> Self {
        match value {
            gif::DisposalMethod::Any => Self::Unspecified,
            gif::DisposalMethod::Keep => Self::Keep,
            gif::DisposalMethod::Background => Self::Background,
            gif::DisposalMethod::Previous => Self::Previous,
        }
    }
}

/// One undecorated frame as stored in the file: a straight-alpha RGBA patch placed at an
/// offset on the logical screen.
#[derive(Clone, Copy, Debug)]
pub struct RawFrame<'a> {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
    /// Delay in centiseconds, the unit GIF stores.
    pub delay_cs: u16,
    pub disposal: Disposal,
}

/// Running canvas that turns patches into complete frames.
#[derive(Clone, Debug)]
pub struct Compositor {
    canvas: Canvas,
    pixels: Vec<u8>,
    pending: Disposal,
    restore_point: Option<Vec<u8>>,
}

impl Compositor {
    pub fn new(canvas: Canvas) -> GifCapResult<Self> {
        Ok(Self {
            pixels: vec![0; canvas.rgba_len()?],
            canvas,
            pending: Disposal::Unspecified,
            restore_point: None,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Apply the previous frame's disposal, draw `raw` and return the composited result.
    pub fn push(&mut self, raw: &RawFrame<'_>) -> GifCapResult<Frame> {
        let expected = (raw.width as usize)
            .checked_mul(raw.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GifCapError::invalid_source("frame patch size overflow"))?;
        if raw.rgba.len() != expected {
            return Err(GifCapError::invalid_source(format!(
                "frame patch holds {} bytes, expected {expected} for {}x{}",
                raw.rgba.len(),
                raw.width,
                raw.height
            )));
        }

        match std::mem::take(&mut self.pending) {
            Disposal::Background => self.pixels.fill(0),
            Disposal::Previous => {
                if let Some(snapshot) = self.restore_point.take() {
                    self.pixels = snapshot;
                }
            }
            Disposal::Keep | Disposal::Unspecified => {}
        }

        self.restore_point = (raw.disposal == Disposal::Previous).then(|| self.pixels.clone());
        self.draw_patch(raw);
        self.pending = raw.disposal;

        let pixels = RgbaImage::from_raw(self.canvas.width, self.canvas.height, self.pixels.clone())
            .ok_or_else(|| GifCapError::invalid_source("canvas buffer size mismatch"))?;
        Ok(Frame::new(pixels, u32::from(raw.delay_cs) * 10))
    }

    fn draw_patch(&mut self, raw: &RawFrame<'_>) {
        let cw = self.canvas.width as usize;
        let x_end = (raw.left.saturating_add(raw.width)).min(self.canvas.width);
        let y_end = (raw.top.saturating_add(raw.height)).min(self.canvas.height);
        for y in raw.top..y_end {
            let src_row = (y - raw.top) as usize * raw.width as usize;
            for x in raw.left..x_end {
                let s = (src_row + (x - raw.left) as usize) * 4;
                let d = (y as usize * cw + x as usize) * 4;
                let src = [raw.rgba[s], raw.rgba[s + 1], raw.rgba[s + 2], raw.rgba[s + 3]];
                let dst = [
                    self.pixels[d],
                    self.pixels[d + 1],
                    self.pixels[d + 2],
                    self.pixels[d + 3],
                ];
                self.pixels[d..d + 4].copy_from_slice(&over_straight(dst, src));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/compositor.rs"]
mod tests;
