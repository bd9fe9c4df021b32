use crate::text::typeface::GlyphMask;

/// Grow a mask by `n` empty pixels on every side.
pub fn pad(src: &GlyphMask, n: u32) -> GlyphMask {
    if n == 0 {
        return src.clone();
    }
    let mut out = GlyphMask::new(src.width + 2 * n, src.height + 2 * n, src.baseline + n as f32);
    for y in 0..src.height {
        let from = (y * src.width) as usize;
        let to = ((y + n) * out.width + n) as usize;
        out.coverage[to..to + src.width as usize]
            .copy_from_slice(&src.coverage[from..from + src.width as usize]);
    }
    out
}

/// Morphological dilation with a disc of `radius` pixels.
///
/// This is the outline a centered stroke of width `2 * radius` leaves outside the glyph edge.
/// The result is padded by `ceil(radius)` on every side; the disc rim is anti-aliased.
pub fn dilate(src: &GlyphMask, radius: f32) -> GlyphMask {
    if !(radius.is_finite() && radius > 0.0) {
        return src.clone();
    }
    let r = radius.ceil() as i64;
    let padded = pad(src, r as u32);
    let mut out = GlyphMask::new(padded.width, padded.height, padded.baseline);

    let mut taps = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            let weight = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if weight > 0.0 {
                taps.push((dx, dy, (weight * 255.0).round() as u16));
            }
        }
    }

    let w = i64::from(padded.width);
    let h = i64::from(padded.height);
    for y in 0..h {
        for x in 0..w {
            let c = padded.coverage[(y * w + x) as usize];
            if c == 0 {
                continue;
            }
            for &(dx, dy, weight) in &taps {
                let v = crate::foundation::math::mul_div255_u8(u16::from(c), weight);
                out.raise(x + dx, y + dy, v);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
