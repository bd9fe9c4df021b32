use crate::text::style::CaptionStyle;

pub const MIN_FONT_SIZE: f32 = 16.0;
pub const MAX_FONT_SIZE: f32 = 72.0;

/// Pick a font size from the frame width and caption length.
///
/// Longer captions get smaller text; the result is clamped to
/// [`MIN_FONT_SIZE`]`..=`[`MAX_FONT_SIZE`].
pub fn calculate_font_size(width: u32, text: &str, style: CaptionStyle) -> f32 {
    let len = text.chars().count();
    let length_multiplier = if len > 30 {
        0.7
    } else if len > 20 {
        0.85
    } else if len > 10 {
        1.0
    } else {
        1.2
    };
    let base = width as f32 * 0.08;
    (base * length_multiplier * style.preset().size_multiplier).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

#[cfg(test)]
#[path = "../../tests/unit/text/sizing.rs"]
mod tests;
