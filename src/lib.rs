//! gifcap burns styled text captions into animated GIFs.
//!
//! The pipeline has four stages, each usable on its own:
//!
//! - [`decode_gif`] turns GIF bytes into fully composited RGBA [`Frame`]s, honoring each
//!   frame's disposal method
//! - [`wrap_text`] and [`calculate_font_size`] lay a caption out for a frame width
//! - [`CaptionRenderer`] paints shadow, stroke and fill onto every frame
//! - [`GifEncoder`] re-encodes the frames on a worker pool under a [`SizeBudget`]
//!
//! [`Captioner`] strings them together and reports progress as it goes.
#![forbid(unsafe_code)]

mod foundation;

pub mod decode;
pub mod encode;
pub mod frame;
pub mod pipeline;
pub mod render;
pub mod text;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{GifCapError, GifCapResult, SizeBudgetExceeded};

pub use crate::decode::{DecodedGif, decode_gif};
pub use crate::encode::{EncodedGif, EncoderOptions, GifEncoder, Repeat, SizeBudget, SizePolicy};
pub use crate::frame::{Frame, total_duration_ms};
pub use crate::pipeline::{
    Captioner, FileSource, GifSource, MemorySource, ProcessedGif, encode_png, to_data_uri,
};
#[cfg(feature = "http")]
pub use crate::pipeline::HttpSource;
pub use crate::render::caption::{
    CaptionLayout, CaptionRenderer, LineLayout, layout_caption, overlay_text_on_frame,
};
pub use crate::text::bitmap::BitmapFace;
pub use crate::text::color::Color;
pub use crate::text::options::CaptionOptions;
pub use crate::text::sizing::calculate_font_size;
pub use crate::text::style::{CaptionPosition, CaptionStyle, FontWeight, StylePreset};
#[cfg(feature = "truetype")]
pub use crate::text::truetype::TrueTypeFace;
pub use crate::text::typeface::{GlyphMask, Typeface};
pub use crate::text::wrap::wrap_text;
