//! Animated GIF encoding.
//!
//! Quantization and LZW compression are the expensive part of writing a GIF, and they are
//! independent per frame. [`GifEncoder`] fans them out over a dedicated rayon pool while the
//! calling thread writes the compressed frames in order.

pub mod budget;

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::mpsc;

use image::imageops::{self, FilterType};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use budget::{DEFAULT_MAX_BYTES, SizeBudget, SizePolicy};

use crate::foundation::error::{GifCapError, GifCapResult, SizeBudgetExceeded};
use crate::frame::Frame;

pub const DEFAULT_QUALITY: u8 = 10;
pub const DEFAULT_WORKERS: usize = 2;

/// Loop behavior written into the NETSCAPE extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    #[default]
    Infinite,
    Finite(u16),
}

impl From<Repeat> for gif::Repeat {
    fn from(value: Repeat) -> Self {
        match value {
            Repeat::Infinite => gif::Repeat::Infinite,
            Repeat::Finite(n) => gif::Repeat::Finite(n),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderOptions {
    /// Output width; `None` keeps the width of the first frame.
    pub width: Option<u32>,
    /// Output height; `None` keeps the height of the first frame.
    pub height: Option<u32>,
    /// NeuQuant sampling factor, `1..=30`. Lower is slower and more faithful.
    pub quality: u8,
    pub workers: usize,
    pub repeat: Repeat,
    pub size_budget: SizeBudget,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            quality: DEFAULT_QUALITY,
            workers: DEFAULT_WORKERS,
            repeat: Repeat::Infinite,
            size_budget: SizeBudget::default(),
        }
    }
}

impl EncoderOptions {
    pub fn validate(&self) -> GifCapResult<()> {
        if !(1..=30).contains(&self.quality) {
            return Err(GifCapError::validation(format!(
                "encoder quality must be in 1..=30, got {}",
                self.quality
            )));
        }
        if self.workers == 0 {
            return Err(GifCapError::validation("encoder workers must be >= 1"));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(GifCapError::validation(
                "encoder width/height must be > 0 when set",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedGif {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
    /// Set when the output went over budget under [`SizePolicy::Warn`].
    pub size_warning: Option<SizeBudgetExceeded>,
}

#[derive(Clone, Debug, Default)]
pub struct GifEncoder {
    options: EncoderOptions,
}

impl GifEncoder {
    pub fn new(options: EncoderOptions) -> GifCapResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode `frames` into one looping GIF.
    ///
    /// `on_progress` receives `written / total` after each frame lands in the output, so values
    /// are non-decreasing and the last one is `1.0`.
    #[tracing::instrument(skip(self, frames, on_progress), fields(frames = frames.len()))]
    pub fn encode<P>(&self, frames: &[Frame], mut on_progress: P) -> GifCapResult<EncodedGif>
    where
        P: FnMut(f32),
    {
        let first = frames
            .first()
            .ok_or_else(|| GifCapError::encode_failure("no frames to encode"))?;
        let width = self.options.width.unwrap_or_else(|| first.width());
        let height = self.options.height.unwrap_or_else(|| first.height());
        let (w16, h16) = gif_dimensions(width, height)?;

        let pool = build_thread_pool(self.options.workers)?;
        let speed = i32::from(self.options.quality);
        let total = frames.len();

        let mut bytes = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut bytes, w16, h16, &[])
                .map_err(|e| GifCapError::encode_failure(format!("gif header: {e}")))?;
            encoder
                .set_repeat(self.options.repeat.into())
                .map_err(|e| GifCapError::encode_failure(format!("gif repeat: {e}")))?;

            let (send, recv) = mpsc::channel::<(usize, gif::Frame<'static>)>();
            std::thread::scope(|scope| -> GifCapResult<()> {
                let producer = scope.spawn(move || {
                    pool.install(|| {
                        frames.par_iter().enumerate().try_for_each_with(
                            send,
                            |send, (idx, frame)| {
                                let compressed = compress_frame(frame, w16, h16, speed);
                                send.send((idx, compressed)).map_err(|_| {
                                    GifCapError::encode_failure("frame writer hung up")
                                })
                            },
                        )
                    })
                });

                let written = write_in_order(&mut encoder, recv, total, &mut on_progress);
                producer
                    .join()
                    .map_err(|_| GifCapError::encode_failure("encoder worker panicked"))??;
                written
            })?;

            encoder
                .into_inner()
                .map_err(|e| GifCapError::encode_failure(format!("gif trailer: {e}")))?;
        }

        let size_warning = self.options.size_budget.check(bytes.len())?;
        tracing::debug!(
            bytes = bytes.len(),
            width,
            height,
            frames = total,
            "gif encoded"
        );

        Ok(EncodedGif {
            bytes,
            width,
            height,
            frame_count: total,
            size_warning,
        })
    }
}

fn gif_dimensions(width: u32, height: u32) -> GifCapResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(GifCapError::encode_failure(format!(
            "cannot encode a {width}x{height} gif"
        )));
    }
    let w = u16::try_from(width).map_err(|_| {
        GifCapError::encode_failure(format!("width {width} does not fit a gif (max 65535)"))
    })?;
    let h = u16::try_from(height).map_err(|_| {
        GifCapError::encode_failure(format!("height {height} does not fit a gif (max 65535)"))
    })?;
    Ok((w, h))
}

fn build_thread_pool(workers: usize) -> GifCapResult<rayon::ThreadPool> {
    if workers == 0 {
        return Err(GifCapError::validation("encoder workers must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("gifcap-encode-{i}"))
        .build()
        .map_err(|e| GifCapError::encode_failure(format!("failed to build rayon thread pool: {e}")))
}

/// Milliseconds to GIF centiseconds, rounded to nearest.
pub(crate) fn delay_to_cs(delay_ms: u32) -> u16 {
    let cs = delay_ms.saturating_add(5) / 10;
    u16::try_from(cs).unwrap_or(u16::MAX)
}

fn compress_frame(frame: &Frame, width: u16, height: u16, speed: i32) -> gif::Frame<'static> {
    let (w, h) = (u32::from(width), u32::from(height));
    let mut rgba = if frame.width() == w && frame.height() == h {
        frame.pixels.as_raw().clone()
    } else {
        imageops::resize(&frame.pixels, w, h, FilterType::Triangle).into_raw()
    };

    let mut out = gif::Frame::from_rgba_speed(width, height, &mut rgba, speed);
    out.delay = delay_to_cs(frame.delay_ms);
    // Every output frame is a full canvas.
    out.dispose = gif::DisposalMethod::Background;
    out.make_lzw_pre_encoded();
    out
}

fn write_in_order<W, P>(
    encoder: &mut gif::Encoder<W>,
    recv: mpsc::Receiver<(usize, gif::Frame<'static>)>,
    total: usize,
    on_progress: &mut P,
) -> GifCapResult<()>
where
    W: Write,
    P: FnMut(f32),
{
    // Frames arrive in completion order.
    let mut pending = BTreeMap::new();
    let mut next = 0usize;
    let mut failure = None;

    // Keep draining after a write error so producers never block on a dead channel.
    for (idx, frame) in recv {
        pending.insert(idx, frame);
        while let Some(frame) = pending.remove(&next) {
            next += 1;
            if failure.is_some() {
                continue;
            }
            match encoder.write_lzw_pre_encoded_frame(&frame) {
                Ok(()) => on_progress(next as f32 / total as f32),
                Err(e) => {
                    failure = Some(GifCapError::encode_failure(format!(
                        "writing frame {}: {e}",
                        next - 1
                    )));
                }
            }
        }
    }

    if let Some(e) = failure {
        return Err(e);
    }
    if next != total {
        return Err(GifCapError::encode_failure(format!(
            "only {next} of {total} frames were compressed"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
