use serde::{Deserialize, Serialize};

use crate::foundation::core::Vec2;
use crate::text::color::Color;

/// Vertical anchor of the caption block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPosition {
    Top,
    #[default]
    Bottom,
    Center,
}

/// Named caption look. Each variant maps to one immutable [`StylePreset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionStyle {
    /// Bold white uppercase text with a black outline.
    #[default]
    Classic,
    /// Mixed-case text with a soft drop shadow.
    Modern,
}

impl CaptionStyle {
    /// Resolve the preset for this style.
    pub fn preset(self) -> &'static StylePreset {
        match self {
            Self::Classic => &CLASSIC,
            Self::Modern => &MODERN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseTransform {
    None,
    Upper,
}

impl CaseTransform {
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::None => text.to_owned(),
            Self::Upper => text.to_uppercase(),
        }
    }
}

/// Drop shadow cast by both the stroke and the fill of a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Blur extent in pixels; the Gaussian sigma is half of this.
    pub blur: f32,
    pub color: Color,
    pub offset: Vec2,
}

/// Immutable rendering parameters for one [`CaptionStyle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylePreset {
    pub font_family: &'static str,
    pub weight: FontWeight,
    pub case: CaseTransform,
    pub text_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub shadow: Option<Shadow>,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Multiplier applied by the font-size heuristic.
    pub size_multiplier: f32,
}

static CLASSIC: StylePreset = StylePreset {
    font_family: "Impact",
    weight: FontWeight::Bold,
    case: CaseTransform::Upper,
    text_color: Color::WHITE,
    stroke_color: Color::BLACK,
    stroke_width: 3.0,
    shadow: None,
    line_height: 1.2,
    size_multiplier: 1.0,
};

static MODERN: StylePreset = StylePreset {
    font_family: "Helvetica",
    weight: FontWeight::Regular,
    case: CaseTransform::None,
    text_color: Color::WHITE,
    stroke_color: Color::BLACK,
    stroke_width: 0.0,
    shadow: Some(Shadow {
        blur: 8.0,
        color: Color::rgba(0.0, 0.0, 0.0, 0.8),
        offset: Vec2::new(2.0, 2.0),
    }),
    line_height: 1.3,
    size_multiplier: 0.85,
};
