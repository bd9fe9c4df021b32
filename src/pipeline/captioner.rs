use std::sync::Arc;

use image::RgbaImage;

use crate::decode::{DecodedGif, decode_gif};
use crate::encode::{EncoderOptions, GifEncoder};
use crate::foundation::error::{GifCapError, GifCapResult};
use crate::frame::{Frame, total_duration_ms};
use crate::pipeline::output::ProcessedGif;
use crate::pipeline::source::GifSource;
use crate::render::caption::CaptionRenderer;
use crate::text::bitmap::BitmapFace;
use crate::text::options::CaptionOptions;
use crate::text::typeface::Typeface;

const DECODED_PCT: f32 = 20.0;
const CAPTIONED_PCT: f32 = 60.0;
const DONE_PCT: f32 = 100.0;

/// Drives fetch, decode, caption and encode for one source.
///
/// A `Captioner` holds no per-run state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct Captioner<S> {
    source: S,
    face: Arc<dyn Typeface>,
    encoder: EncoderOptions,
}

impl<S> std::fmt::Debug for Captioner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Captioner")
            .field("typeface", &self.face.family())
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl<S: GifSource> Captioner<S> {
    /// Captioner with the built-in bitmap face and default encoder settings.
    pub fn new(source: S) -> Self {
        Self {
            source,
            face: Arc::new(BitmapFace::new()),
            encoder: EncoderOptions::default(),
        }
    }

    pub fn with_typeface(self, face: impl Typeface + 'static) -> Self {
        self.with_shared_typeface(Arc::new(face))
    }

    pub fn with_shared_typeface(mut self, face: Arc<dyn Typeface>) -> Self {
        self.face = face;
        self
    }

    pub fn with_encoder_options(mut self, options: EncoderOptions) -> Self {
        self.encoder = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn typeface(&self) -> &dyn Typeface {
        self.face.as_ref()
    }

    pub fn encoder_options(&self) -> &EncoderOptions {
        &self.encoder
    }

    /// Fetch and decode `location` without captioning it.
    pub fn decode(&self, location: &str) -> GifCapResult<DecodedGif> {
        let bytes = self.source.fetch(location)?;
        decode_gif(&bytes)
    }

    /// Caption every frame of `location` and encode the result.
    ///
    /// `on_progress` receives a stage label and a percentage. Percentages never decrease:
    /// decoding ends at 20, captioning walks to 60 one frame at a time, encoding fills the
    /// rest and the last call is `("done", 100.0)`.
    #[tracing::instrument(skip(self, options, on_progress))]
    pub fn create_captioned_gif<P>(
        &self,
        location: &str,
        options: &CaptionOptions,
        mut on_progress: P,
    ) -> GifCapResult<ProcessedGif>
    where
        P: FnMut(&str, f32),
    {
        options.validate()?;
        let encoder = GifEncoder::new(self.encoder.clone())?;

        on_progress("loading gif", 0.0);
        let decoded = self.decode(location)?;
        let total = decoded.frames.len();
        on_progress("decoded frames", DECODED_PCT);
        tracing::debug!(
            frames = total,
            width = decoded.width,
            height = decoded.height,
            "source decoded"
        );

        let renderer = CaptionRenderer::new(decoded.canvas(), options, self.face.as_ref())?;
        let mut captioned: Vec<Frame> = Vec::with_capacity(total);
        for (i, frame) in decoded.frames.iter().enumerate() {
            captioned.push(renderer.render(frame)?);
            let done = i + 1;
            let pct = DECODED_PCT + (CAPTIONED_PCT - DECODED_PCT) * done as f32 / total as f32;
            on_progress(&format!("processing frame {done}/{total}"), pct);
        }
        drop(decoded);

        let duration_ms = total_duration_ms(&captioned);
        let encoded = encoder.encode(&captioned, |p| {
            on_progress(
                "encoding gif",
                CAPTIONED_PCT + (DONE_PCT - CAPTIONED_PCT) * p.clamp(0.0, 1.0),
            )
        })?;

        let out = ProcessedGif::from_encoded(encoded, duration_ms);
        on_progress("done", DONE_PCT);
        tracing::debug!(
            bytes = out.file_size,
            frames = out.frame_count,
            duration_ms,
            "captioned gif ready"
        );
        Ok(out)
    }

    /// Caption only the first frame of `location`. No encoding happens.
    #[tracing::instrument(skip(self, options))]
    pub fn preview_caption(
        &self,
        location: &str,
        options: &CaptionOptions,
    ) -> GifCapResult<RgbaImage> {
        options.validate()?;
        let decoded = self.decode(location)?;
        let first = decoded
            .frames
            .into_iter()
            .next()
            .ok_or(GifCapError::EmptyAnimation)?;
        let renderer = CaptionRenderer::new(first.canvas(), options, self.face.as_ref())?;
        Ok(renderer.render(&first)?.pixels)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/captioner.rs"]
mod tests;
