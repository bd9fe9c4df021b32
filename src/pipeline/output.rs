use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::encode::EncodedGif;
use crate::foundation::error::{GifCapError, GifCapResult, SizeBudgetExceeded};

pub const GIF_MIME: &str = "image/gif";
pub const PNG_MIME: &str = "image/png";

/// A finished captioned animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedGif {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
    /// Sum of all frame delays.
    pub duration_ms: u64,
    pub file_size: usize,
    /// Present when the output is over the size budget but the policy let it through.
    pub size_warning: Option<SizeBudgetExceeded>,
}

impl ProcessedGif {
    pub(crate) fn from_encoded(encoded: EncodedGif, duration_ms: u64) -> Self {
        let file_size = encoded.bytes.len();
        Self {
            bytes: encoded.bytes,
            width: encoded.width,
            height: encoded.height,
            frame_count: encoded.frame_count,
            duration_ms,
            file_size,
            size_warning: encoded.size_warning,
        }
    }

    /// `data:image/gif;base64,...` for embedding the result directly in a page.
    pub fn data_uri(&self) -> String {
        to_data_uri(&self.bytes, GIF_MIME)
    }
}

pub fn to_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Encode a still (e.g. a caption preview) as PNG.
pub fn encode_png(image: &RgbaImage) -> GifCapResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| GifCapError::encode_failure(format!("png: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/output.rs"]
mod tests;
