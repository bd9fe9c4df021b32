//! Caption text: styles, options, word wrap, sizing and glyph rasterization.

pub mod bitmap;
pub mod color;
pub mod options;
pub mod sizing;
pub mod style;
#[cfg(feature = "truetype")]
pub mod truetype;
pub mod typeface;
pub mod wrap;
