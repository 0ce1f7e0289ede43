use super::*;

fn checker(w: u32, h: u32) -> PremulImage {
    let mut img = PremulImage::transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = if (x + y) % 2 == 0 { 255 } else { 40 };
            let idx = ((y * w + x) * 4) as usize;
            img.data[idx..idx + 4].copy_from_slice(&[v, v / 2, 0, 255]);
        }
    }
    img
}

#[test]
fn kernel_is_interpolating() {
    assert_eq!(cubic_weight(0.0), 1.0);
    assert_eq!(cubic_weight(1.0), 0.0);
    assert_eq!(cubic_weight(2.0), 0.0);
    let sum: f32 = [1.25f32, 0.25, 0.75, 1.75].iter().map(|&t| cubic_weight(t)).sum();
    assert!((sum - 1.0).abs() < 1e-6);
}

#[test]
fn integer_positions_copy_pixels() {
    let img = checker(5, 4);
    for y in 0..4 {
        for x in 0..5 {
            assert_eq!(sample_bicubic(&img, f64::from(x), f64::from(y)), img.pixel(x, y));
        }
    }
}

#[test]
fn far_outside_is_transparent() {
    let img = checker(3, 3);
    assert_eq!(sample_bicubic(&img, -5.0, 1.0), [0; 4]);
    assert_eq!(sample_bicubic(&img, 1.0, 10.0), [0; 4]);
    assert_eq!(sample_bicubic(&img, f64::NAN, 1.0), [0; 4]);
}

#[test]
fn output_stays_premultiplied() {
    let img = checker(6, 6);
    for step in 0..40 {
        let t = f64::from(step) * 0.137;
        let px = sample_bicubic(&img, t, 5.0 - t);
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
}
