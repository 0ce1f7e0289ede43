use super::*;
use crate::foundation::rng::rng_from_seed;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_raw(w, h, px.repeat((w * h) as usize)).unwrap()
}

#[test]
fn brightness_scales_and_saturates() {
    let mut img = solid(2, 2, [100, 200, 10, 77]);
    ColorAdjust::Brightness(1.5).apply(&mut img);
    assert_eq!(img.get_pixel(0, 0).0, [150, 255, 15, 77]);
}

#[test]
fn contrast_zero_collapses_to_mean() {
    let mut img = RgbaImage::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
    ColorAdjust::Contrast(0.0).apply(&mut img);
    let a = img.get_pixel(0, 0).0;
    let b = img.get_pixel(1, 0).0;
    assert_eq!(a, b);
    assert!((i32::from(a[0]) - 128).abs() <= 1);
}

#[test]
fn saturation_zero_is_grayscale() {
    let mut img = solid(1, 1, [200, 40, 90, 255]);
    ColorAdjust::Saturation(0.0).apply(&mut img);
    let p = img.get_pixel(0, 0).0;
    assert_eq!(p[0], p[1]);
    assert_eq!(p[1], p[2]);
}

#[test]
fn hsv_round_trip_is_stable() {
    for rgb in [[255u8, 0, 0], [12, 200, 77], [90, 90, 90], [0, 0, 0], [250, 10, 240]] {
        let (h, s, v) = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
        let back = hsv_to_rgb(h, s, v);
        for c in 0..3 {
            assert!((i32::from(back[c]) - i32::from(rgb[c])).abs() <= 1, "{rgb:?} -> {back:?}");
        }
    }
}

#[test]
fn hue_shift_by_third_rotates_primaries() {
    let mut img = solid(1, 1, [255, 0, 0, 255]);
    ColorAdjust::Hue(1.0 / 3.0).apply(&mut img);
    let p = img.get_pixel(0, 0).0;
    assert!(p[1] >= 254 && p[0] <= 1 && p[2] <= 1, "{p:?}");
}

#[test]
fn sampled_factors_respect_ranges_and_cover_all_adjustments() {
    let cfg = ColorJitterConfig::default();
    let mut rng = rng_from_seed(21);
    for _ in 0..200 {
        let adjusts = sample_color_jitter(&mut rng, &cfg);
        assert_eq!(adjusts.len(), 4);
        let mut seen = [false; 4];
        for a in adjusts {
            match a {
                ColorAdjust::Brightness(f) => {
                    assert!((0.6..=1.4).contains(&f));
                    seen[0] = true;
                }
                ColorAdjust::Contrast(f) => {
                    assert!((0.8..=1.2).contains(&f));
                    seen[1] = true;
                }
                ColorAdjust::Saturation(f) => {
                    assert!((0.9..=1.1).contains(&f));
                    seen[2] = true;
                }
                ColorAdjust::Hue(f) => {
                    assert!((-0.01..=0.01).contains(&f));
                    seen[3] = true;
                }
            }
        }
        assert_eq!(seen, [true; 4]);
    }
}

#[test]
fn no_jitter_and_forced_flip_mirrors_columns() {
    let mut img = RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 9, 8, 7, 255]).unwrap();
    let mut rng = rng_from_seed(22);
    random_photometric(&mut rng, &mut img, &ColorJitterConfig::none(), 1.0);
    assert_eq!(img.as_raw(), &vec![9, 8, 7, 255, 1, 2, 3, 255]);
}

#[test]
fn alpha_is_untouched() {
    let mut img = solid(3, 3, [120, 60, 30, 42]);
    let mut rng = rng_from_seed(23);
    random_photometric(&mut rng, &mut img, &ColorJitterConfig::default(), 0.5);
    assert!(img.pixels().all(|p| p.0[3] == 42));
}
