//! Rotation about the image center onto an expanded canvas.

use kurbo::Vec2;
use rand::Rng;

use crate::foundation::core::{Affine, Point, PremulImage};
use crate::foundation::rng::uniform_f64;
use crate::transform::sample::sample_bicubic;

/// Canvas size that holds a `width x height` raster rotated by `angle_rad`.
pub fn rotated_extent(width: u32, height: u32, angle_rad: f64) -> (u32, u32) {
    let (sin, cos) = angle_rad.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = f64::from(width);
    let h = f64::from(height);
    // The epsilon keeps an exact fit (angle 0, pi/2) from growing by one pixel.
    let out_w = (cos * w + sin * h - 1e-6).ceil().max(1.0);
    let out_h = (sin * w + cos * h - 1e-6).ceil().max(1.0);
    (out_w as u32, out_h as u32)
}

/// Rotate `img` by `angle_rad` around its center, bicubic, no translation or shear.
///
/// The output canvas grows to contain the rotated content; uncovered pixels are transparent.
pub fn rotate_expand(img: &PremulImage, angle_rad: f64) -> PremulImage {
    if angle_rad == 0.0 {
        return img.clone();
    }

    let (out_w, out_h) = rotated_extent(img.width, img.height, angle_rad);
    let src_center = Vec2::new(
        (f64::from(img.width) - 1.0) * 0.5,
        (f64::from(img.height) - 1.0) * 0.5,
    );
    let dst_center = Vec2::new(
        (f64::from(out_w) - 1.0) * 0.5,
        (f64::from(out_h) - 1.0) * 0.5,
    );
    let forward =
        Affine::translate(dst_center) * Affine::rotate(angle_rad) * Affine::translate(-src_center);
    let inverse = forward.inverse();

    let mut out = PremulImage::transparent(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let src = inverse * Point::new(f64::from(x), f64::from(y));
            let px = sample_bicubic(img, src.x, src.y);
            let idx = ((y as usize) * (out_w as usize) + (x as usize)) * 4;
            out.data[idx..idx + 4].copy_from_slice(&px);
        }
    }
    out
}

/// Rotate by an angle drawn uniformly from `[-max_rad, max_rad]`.
pub fn random_rotation<R: Rng + ?Sized>(
    rng: &mut R,
    img: &PremulImage,
    max_rad: f64,
) -> PremulImage {
    let angle = uniform_f64(rng, -max_rad, max_rad);
    tracing::trace!(angle, "rotate object");
    rotate_expand(img, angle)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
