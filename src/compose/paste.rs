//! Alpha-aware paste of a premultiplied object onto an opaque background.

use image::RgbImage;

use crate::foundation::core::PremulImage;
use crate::foundation::math::mul_div255_u8;

/// Source-over of one premultiplied pixel onto an opaque RGB pixel.
#[inline]
pub fn over_opaque(dst: [u8; 3], src: [u8; 4]) -> [u8; 3] {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [src[0], src[1], src[2]];
    }
    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Paste `src` with its top-left corner at `(x, y)`; pixels falling off the background are
/// dropped.
pub fn paste_over(dst: &mut RgbImage, src: &PremulImage, x: u32, y: u32) {
    let (dw, dh) = dst.dimensions();
    for sy in 0..src.height {
        let Some(dy) = y.checked_add(sy).filter(|&v| v < dh) else {
            break;
        };
        for sx in 0..src.width {
            let Some(dx) = x.checked_add(sx).filter(|&v| v < dw) else {
                break;
            };
            let s = src.pixel(sx, sy);
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(dx, dy);
            d.0 = over_opaque(d.0, s);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/paste.rs"]
mod tests;
