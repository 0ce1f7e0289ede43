//! Object size selection and placement on the background.

use rand::Rng;

use crate::annotation::record::Placement;
use crate::foundation::rng::uniform_u32_or_low;

/// `[floor(side * min), floor(side * max))`, never below 1.
pub fn fraction_range(side: u32, min_fraction: f64, max_fraction: f64) -> (u32, u32) {
    let lo = ((f64::from(side) * min_fraction).floor() as u32).max(1);
    let hi = ((f64::from(side) * max_fraction).floor() as u32).max(lo);
    (lo, hi)
}

/// `(round(height * aspect), height)`, both at least 1.
pub fn size_from_height(height: u32, aspect: f64) -> (u32, u32) {
    let w = (f64::from(height) * aspect).round().max(1.0);
    (w as u32, height.max(1))
}

/// `(width, round(width / aspect))`, both at least 1.
pub fn size_from_width(width: u32, aspect: f64) -> (u32, u32) {
    let h = (f64::from(width) / aspect).round().max(1.0);
    (width.max(1), h as u32)
}

/// Pick the pasted object size for a `bg_width x bg_height` background.
///
/// The height is drawn first and the width follows the aspect ratio. When that width would
/// not fit (`w > bg_width - 1`), the width is drawn instead and the height follows.
pub fn select_object_size<R: Rng + ?Sized>(
    rng: &mut R,
    bg_width: u32,
    bg_height: u32,
    aspect: f64,
    min_fraction: f64,
    max_fraction: f64,
) -> (u32, u32) {
    let (h_lo, h_hi) = fraction_range(bg_height, min_fraction, max_fraction);
    let (mut w, mut h) = size_from_height(uniform_u32_or_low(rng, h_lo, h_hi), aspect);

    if w > bg_width.saturating_sub(1) {
        let (w_lo, w_hi) = fraction_range(bg_width, min_fraction, max_fraction);
        let too_wide = w;
        (w, h) = size_from_width(uniform_u32_or_low(rng, w_lo, w_hi), aspect);
        tracing::debug!(too_wide, w, h, "object too wide; sized from width");
    }

    (w.min(bg_width), h.min(bg_height))
}

/// Draw a top-left offset so the `width x height` object lies inside the background.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    bg_width: u32,
    bg_height: u32,
    width: u32,
    height: u32,
) -> Placement {
    let x = uniform_u32_or_low(rng, 0, bg_width.saturating_sub(width));
    let y = uniform_u32_or_low(rng, 0, bg_height.saturating_sub(height));
    Placement {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/scale.rs"]
mod tests;
