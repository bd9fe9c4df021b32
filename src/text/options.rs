use serde::{Deserialize, Serialize};

use crate::foundation::error::{GifCapError, GifCapResult};
use crate::text::color::Color;
use crate::text::style::{CaptionPosition, CaptionStyle, Shadow, StylePreset};

/// Padding applied when the caller does not provide one.
pub const DEFAULT_PADDING: f32 = 10.0;

/// Caller-facing caption settings. `None` fields fall back to the style preset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionOptions {
    pub text: String,
    pub position: CaptionPosition,
    pub style: CaptionStyle,
    pub font_size: Option<f32>,
    pub text_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f32>,
    pub padding: Option<f32>,
}

impl CaptionOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: CaptionPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_style(mut self, style: CaptionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn validate(&self) -> GifCapResult<()> {
        if let Some(size) = self.font_size
            && !(size.is_finite() && size > 0.0)
        {
            return Err(GifCapError::validation("font_size must be a finite number > 0"));
        }
        if let Some(w) = self.stroke_width
            && !(w.is_finite() && w >= 0.0)
        {
            return Err(GifCapError::validation(
                "stroke_width must be a finite number >= 0",
            ));
        }
        if let Some(p) = self.padding
            && !(p.is_finite() && p >= 0.0)
        {
            return Err(GifCapError::validation("padding must be a finite number >= 0"));
        }
        Ok(())
    }

    pub fn preset(&self) -> &'static StylePreset {
        self.style.preset()
    }

    /// Merge the explicit fields over the preset defaults.
    pub(crate) fn resolve(&self) -> GifCapResult<ResolvedStyle> {
        self.validate()?;
        let preset = self.preset();
        Ok(ResolvedStyle {
            display_text: preset.case.apply(&self.text),
            text_color: self.text_color.unwrap_or(preset.text_color),
            stroke_color: self.stroke_color.unwrap_or(preset.stroke_color),
            stroke_width: self.stroke_width.unwrap_or(preset.stroke_width),
            padding: self.padding.unwrap_or(DEFAULT_PADDING),
            shadow: preset.shadow,
            preset,
        })
    }
}

/// Caption settings with every default filled in.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedStyle {
    pub(crate) display_text: String,
    pub(crate) text_color: Color,
    pub(crate) stroke_color: Color,
    pub(crate) stroke_width: f32,
    pub(crate) padding: f32,
    pub(crate) shadow: Option<Shadow>,
    pub(crate) preset: &'static StylePreset,
}

#[cfg(test)]
#[path = "../../tests/unit/text/options.rs"]
mod tests;
