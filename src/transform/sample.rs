//! Bicubic sampling over premultiplied pixels.

use crate::foundation::core::PremulImage;
use crate::foundation::math::to_u8_sat;

const CUBIC_A: f32 = -0.5;

/// Catmull-Rom kernel weight at distance `t`.
#[inline]
fn cubic_weight(t: f32) -> f32 {
    let t = t.abs();
    if t <= 1.0 {
        ((CUBIC_A + 2.0) * t - (CUBIC_A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((CUBIC_A * t - 5.0 * CUBIC_A) * t + 8.0 * CUBIC_A) * t - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

/// Sample `img` at pixel-index coordinates `(x, y)`; pixels outside the raster are transparent.
pub fn sample_bicubic(img: &PremulImage, x: f64, y: f64) -> [u8; 4] {
    let w = i64::from(img.width);
    let h = i64::from(img.height);
    if !x.is_finite() || !y.is_finite() || x <= -2.0 || y <= -2.0 {
        return [0; 4];
    }
    if x >= (w + 1) as f64 || y >= (h + 1) as f64 {
        return [0; 4];
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = (x - x0) as f32;
    let fy = (y - y0) as f32;
    let ix = x0 as i64;
    let iy = y0 as i64;

    let wx = [
        cubic_weight(fx + 1.0),
        cubic_weight(fx),
        cubic_weight(1.0 - fx),
        cubic_weight(2.0 - fx),
    ];
    let wy = [
        cubic_weight(fy + 1.0),
        cubic_weight(fy),
        cubic_weight(1.0 - fy),
        cubic_weight(2.0 - fy),
    ];

    let mut acc = [0.0f32; 4];
    for (j, &ky) in wy.iter().enumerate() {
        let sy = iy - 1 + j as i64;
        if sy < 0 || sy >= h || ky == 0.0 {
            continue;
        }
        for (i, &kx) in wx.iter().enumerate() {
            let sx = ix - 1 + i as i64;
            if sx < 0 || sx >= w || kx == 0.0 {
                continue;
            }
            let k = kx * ky;
            let px = img.pixel(sx as u32, sy as u32);
            for c in 0..4 {
                acc[c] += k * f32::from(px[c]);
            }
        }
    }

    let a = to_u8_sat(acc[3]);
    // Cubic overshoot can push color above alpha, which is not a valid premultiplied pixel.
    [
        to_u8_sat(acc[0]).min(a),
        to_u8_sat(acc[1]).min(a),
        to_u8_sat(acc[2]).min(a),
        a,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/transform/sample.rs"]
mod tests;
