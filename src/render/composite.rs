use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{GifCapError, GifCapResult};
use crate::foundation::math::mul_div255_u8;
use crate::text::typeface::GlyphMask;

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Straight-alpha source-over, used when drawing decoded GIF patches.
///
/// Opaque source pixels replace the destination and fully transparent ones leave it untouched.
pub fn over_straight(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        _ => {
            let mut d = Rgba8Premul::from_straight_rgba(dst[0], dst[1], dst[2], dst[3]).to_array();
            let s = Rgba8Premul::from_straight_rgba(src[0], src[1], src[2], src[3]).to_array();
            d = over(d, s, 1.0);
            crate::foundation::core::unpremultiply_in_place(&mut d);
            d
        }
    }
}

/// Paint `color` through `mask` onto a premultiplied RGBA8 buffer.
///
/// `left`/`top` place the mask's top-left corner in canvas pixels; parts of the mask that fall
/// outside the canvas are clipped.
pub fn paint_mask(
    dst: &mut [u8],
    canvas: Canvas,
    mask: &GlyphMask,
    left: i64,
    top: i64,
    color: Rgba8Premul,
) -> GifCapResult<()> {
    if dst.len() != canvas.rgba_len()? {
        return Err(GifCapError::validation(
            "paint_mask expects dst matching width*height*4",
        ));
    }
    if color.a == 0 {
        return Ok(());
    }

    let cw = i64::from(canvas.width);
    let ch = i64::from(canvas.height);
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = left.saturating_add(i64::from(mask.width)).min(cw);
    let y1 = top.saturating_add(i64::from(mask.height)).min(ch);

    for y in y0..y1 {
        for x in x0..x1 {
            let c = mask.get((x - left) as u32, (y - top) as u32);
            if c == 0 {
                continue;
            }
            let idx = ((y * cw + x) as usize) * 4;
            let d = [dst[idx], dst[idx + 1], dst[idx + 2], dst[idx + 3]];
            let out = over(d, color.scaled(c), 1.0);
            dst[idx..idx + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
