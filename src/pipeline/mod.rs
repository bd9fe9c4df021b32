//! End-to-end orchestration: fetch, decode, caption, encode.

pub mod captioner;
pub mod output;
pub mod source;

pub use captioner::Captioner;
pub use output::{ProcessedGif, encode_png, to_data_uri};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{FileSource, GifSource, MemorySource};
