//! Photometric jitter and horizontal flip on straight-alpha RGBA.

use image::RgbaImage;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::ColorJitterConfig;
use crate::foundation::math::to_u8_sat;
use crate::foundation::rng::{chance, uniform_f64};

/// One photometric adjustment with its drawn parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorAdjust {
    /// Scale every color channel.
    Brightness(f32),
    /// Blend toward the mean luma of the image.
    Contrast(f32),
    /// Blend toward the per-pixel luma.
    Saturation(f32),
    /// Rotate the HSV hue by a fraction of a full turn.
    Hue(f32),
}

impl ColorAdjust {
    /// Apply in place; alpha is left untouched.
    pub fn apply(self, img: &mut RgbaImage) {
        match self {
            Self::Brightness(f) => {
                for px in img.pixels_mut() {
                    for c in &mut px.0[..3] {
                        *c = to_u8_sat(f32::from(*c) * f);
                    }
                }
            }
            Self::Contrast(f) => {
                let mean = mean_luma(img);
                for px in img.pixels_mut() {
                    for c in &mut px.0[..3] {
                        *c = to_u8_sat(blend(f32::from(*c), mean, f));
                    }
                }
            }
            Self::Saturation(f) => {
                for px in img.pixels_mut() {
                    let gray = luma(px.0);
                    for c in &mut px.0[..3] {
                        *c = to_u8_sat(blend(f32::from(*c), gray, f));
                    }
                }
            }
            Self::Hue(shift) => {
                if shift == 0.0 {
                    return;
                }
                for px in img.pixels_mut() {
                    let (h, s, v) = rgb_to_hsv(px.0[0], px.0[1], px.0[2]);
                    let h = (h + shift).rem_euclid(1.0);
                    let [r, g, b] = hsv_to_rgb(h, s, v);
                    px.0[0] = r;
                    px.0[1] = g;
                    px.0[2] = b;
                }
            }
        }
    }
}

/// Draw one factor per adjustment and shuffle the order they run in.
pub fn sample_color_jitter<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &ColorJitterConfig,
) -> Vec<ColorAdjust> {
    let mut order = [0u8, 1, 2, 3];
    order.shuffle(rng);

    let mut factor = |m: f64| {
        let (lo, hi) = ColorJitterConfig::factor_range(m);
        uniform_f64(rng, lo, hi) as f32
    };
    let brightness = factor(cfg.brightness);
    let contrast = factor(cfg.contrast);
    let saturation = factor(cfg.saturation);
    let hue = uniform_f64(rng, -cfg.hue, cfg.hue) as f32;

    order
        .iter()
        .map(|k| match k {
            0 => ColorAdjust::Brightness(brightness),
            1 => ColorAdjust::Contrast(contrast),
            2 => ColorAdjust::Saturation(saturation),
            _ => ColorAdjust::Hue(hue),
        })
        .collect()
}

/// Jitter colors, then flip horizontally with probability `flip_probability`.
pub fn random_photometric<R: Rng + ?Sized>(
    rng: &mut R,
    img: &mut RgbaImage,
    cfg: &ColorJitterConfig,
    flip_probability: f64,
) {
    for adjust in sample_color_jitter(rng, cfg) {
        adjust.apply(img);
    }
    if chance(rng, flip_probability) {
        image::imageops::flip_horizontal_in_place(img);
    }
}

#[inline]
fn blend(c: f32, toward: f32, f: f32) -> f32 {
    f * c + (1.0 - f) * toward
}

#[inline]
fn luma(px: [u8; 4]) -> f32 {
    0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2])
}

fn mean_luma(img: &RgbaImage) -> f32 {
    let n = u64::from(img.width()) * u64::from(img.height());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = img.pixels().map(|p| f64::from(luma(p.0))).sum();
    (sum / n as f64) as f32
}

fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let s = if max <= 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match (sector as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_u8_sat(r * 255.0), to_u8_sat(g * 255.0), to_u8_sat(b * 255.0)]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/jitter.rs"]
mod tests;
