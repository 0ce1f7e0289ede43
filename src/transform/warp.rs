//! Random perspective distortion.

use rand::Rng;

use crate::foundation::core::{CornerQuad, Point, PremulImage};
use crate::foundation::error::{PasteError, PasteResult};
use crate::foundation::rng::{chance, uniform_u32_inclusive};
use crate::transform::perspective::{PerspectiveCoefficients, solve_perspective};
use crate::transform::sample::sample_bicubic;

/// Draw perturbed corners for a `width x height` raster.
///
/// Each corner moves inward by up to `distortion_scale` of the half extent on both axes and
/// stays inside its own quadrant.
pub fn random_endpoints<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    distortion_scale: f64,
) -> CornerQuad {
    let dw = (distortion_scale * f64::from(width / 2)).floor() as u32;
    let dh = (distortion_scale * f64::from(height / 2)).floor() as u32;
    let right_lo = width.saturating_sub(dw + 1);
    let right_hi = width.saturating_sub(1);
    let bottom_lo = height.saturating_sub(dh + 1);
    let bottom_hi = height.saturating_sub(1);

    let mut pt = |x_lo: u32, x_hi: u32, y_lo: u32, y_hi: u32| {
        let x = uniform_u32_inclusive(rng, x_lo, x_hi);
        let y = uniform_u32_inclusive(rng, y_lo, y_hi);
        Point::new(f64::from(x), f64::from(y))
    };

    let top_left = pt(0, dw, 0, dh);
    let top_right = pt(right_lo, right_hi, 0, dh);
    let bottom_right = pt(right_lo, right_hi, bottom_lo, bottom_hi);
    let bottom_left = pt(0, dw, bottom_lo, bottom_hi);
    CornerQuad::new([top_left, top_right, bottom_right, bottom_left])
}

/// Resample through `coeffs`, which map each output pixel to its source location.
pub fn warp_perspective(img: &PremulImage, coeffs: &PerspectiveCoefficients) -> PremulImage {
    let mut out = PremulImage::transparent(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let Some(src) = coeffs.apply(Point::new(f64::from(x), f64::from(y))) else {
                continue;
            };
            let px = sample_bicubic(img, src.x, src.y);
            let idx = ((y as usize) * (img.width as usize) + (x as usize)) * 4;
            out.data[idx..idx + 4].copy_from_slice(&px);
        }
    }
    out
}

/// With probability `probability`, squeeze the corners of `img` toward its center and warp it
/// onto a same-size canvas; otherwise hand `img` back untouched.
///
/// A perturbed quad that is not convex skips the warp for this call.
pub fn random_perspective<R: Rng + ?Sized>(
    rng: &mut R,
    img: PremulImage,
    probability: f64,
    distortion_scale: f64,
) -> PasteResult<PremulImage> {
    if !chance(rng, probability) {
        return Ok(img);
    }
    if img.width < 2 || img.height < 2 {
        return Err(PasteError::degenerate_geometry(format!(
            "cannot warp a {}x{} object: source rectangle has no area",
            img.width, img.height
        )));
    }

    let start = CornerQuad::pixel_corners(img.width, img.height);
    let end = random_endpoints(rng, img.width, img.height, distortion_scale);
    if !end.is_convex_clockwise() {
        tracing::debug!(?end, "perturbed quad is not convex; skipping warp");
        return Ok(img);
    }

    // Output pixels live in the perturbed quad and sample from the original rectangle.
    let coeffs = solve_perspective(&end, &start)?;
    Ok(warp_perspective(&img, &coeffs))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/warp.rs"]
mod tests;
