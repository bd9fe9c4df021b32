//! GIF decoding into fully composited frames.

pub mod compositor;

use std::io::Cursor;

use crate::foundation::core::Canvas;
use crate::foundation::error::{GifCapError, GifCapResult};
use crate::frame::Frame;

pub use compositor::{Compositor, Disposal, RawFrame};

/// Every frame of an animation, composited to full canvas size.
#[derive(Clone, Debug)]
pub struct DecodedGif {
    pub frames: Vec<Frame>,
    pub width: u32,
    pub height: u32,
}

impl DecodedGif {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        crate::frame::total_duration_ms(&self.frames)
    }
}

/// Decode GIF bytes into composited frames, honoring each frame's disposal method.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_gif(bytes: &[u8]) -> GifCapResult<DecodedGif> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options
        .read_info(Cursor::new(bytes))
        .map_err(|e| GifCapError::invalid_source(format!("not a decodable gif: {e}")))?;
    let screen = (u32::from(decoder.width()), u32::from(decoder.height()));

    let mut compositor: Option<Compositor> = None;
    let mut frames = Vec::new();
    while let Some(frame) = decoder
        .read_next_frame()
        .map_err(|e| GifCapError::invalid_source(format!("frame {}: {e}", frames.len())))?
    {
        let raw = RawFrame {
            left: u32::from(frame.left),
            top: u32::from(frame.top),
            width: u32::from(frame.width),
            height: u32::from(frame.height),
            rgba: &frame.buffer[..],
            delay_cs: frame.delay,
            disposal: frame.dispose.into(),
        };
        let compositor = match &mut compositor {
            Some(c) => c,
            slot @ None => slot.insert(Compositor::new(initial_canvas(screen, &raw)?)?),
        };
        frames.push(compositor.push(&raw)?);
    }

    let Some(compositor) = compositor else {
        return Err(GifCapError::EmptyAnimation);
    };
    let canvas = compositor.canvas();
    tracing::debug!(
        frames = frames.len(),
        width = canvas.width,
        height = canvas.height,
        "gif decoded"
    );
    Ok(DecodedGif {
        frames,
        width: canvas.width,
        height: canvas.height,
    })
}

/// The logical screen, or the first frame's extent when the screen descriptor is empty.
fn initial_canvas(screen: (u32, u32), first: &RawFrame<'_>) -> GifCapResult<Canvas> {
    let (w, h) = if screen.0 > 0 && screen.1 > 0 {
        screen
    } else {
        (first.left + first.width, first.top + first.height)
    };
    Canvas::new(w, h).map_err(|_| GifCapError::invalid_source("gif has a zero-sized canvas"))
}
