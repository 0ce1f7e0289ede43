use super::*;
use crate::config::ColorJitterConfig;
use crate::foundation::rng::rng_from_seed;

fn plain_config() -> CompositorConfig {
    CompositorConfig {
        paste_probability: 1.0,
        perspective_probability: 0.0,
        rotation_max_radians: 0.0,
        flip_probability: 0.0,
        jitter: ColorJitterConfig::none(),
        ..CompositorConfig::default()
    }
}

fn object(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([250, 20, 20, 255]))
}

#[test]
fn invalid_config_fails_at_construction() {
    let cfg = CompositorConfig {
        paste_probability: 2.0,
        ..CompositorConfig::default()
    };
    assert!(matches!(
        Compositor::new(cfg),
        Err(PasteError::Configuration(_))
    ));
}

#[test]
fn zero_area_inputs_are_invalid_images() {
    let c = Compositor::new(CompositorConfig::default()).unwrap();
    let mut rng = rng_from_seed(1);
    let err = c
        .composite(&mut rng, RgbImage::new(0, 10), &object(4, 4), 1)
        .unwrap_err();
    assert!(matches!(err, PasteError::InvalidImage(_)));
    let err = c
        .composite(&mut rng, RgbImage::new(10, 10), &RgbaImage::new(4, 0), 1)
        .unwrap_err();
    assert!(matches!(err, PasteError::InvalidImage(_)));
}

#[test]
fn never_paste_returns_background_untouched() {
    let c = Compositor::new(CompositorConfig {
        paste_probability: 0.0,
        ..CompositorConfig::default()
    })
    .unwrap();
    let bg = RgbImage::from_pixel(32, 24, image::Rgb([7, 8, 9]));
    let mut rng = rng_from_seed(2);
    let out = c.composite(&mut rng, bg.clone(), &object(5, 5), 42).unwrap();
    assert_eq!(out.image, bg);
    assert!(out.placement.is_none());
    assert_eq!(out.annotations, vec![CompositeAnnotation::absent(42, 0)]);
}

#[test]
fn plain_paste_writes_object_color_at_placement() {
    let c = Compositor::new(plain_config()).unwrap();
    let bg = RgbImage::from_pixel(640, 480, image::Rgb([0, 0, 255]));
    let mut rng = rng_from_seed(3);
    let out = c.composite(&mut rng, bg, &object(100, 50), 5).unwrap();

    let p = out.placement.unwrap();
    assert_eq!(p.width, 2 * p.height);
    let (cx, cy) = (p.x + p.width / 2, p.y + p.height / 2);
    assert_eq!(out.image.get_pixel(cx, cy).0, [250, 20, 20]);
    if p.x > 0 {
        assert_eq!(out.image.get_pixel(p.x - 1, cy).0, [0, 0, 255]);
    }

    let ann = &out.annotations[0];
    assert_eq!(ann.image_id, 5);
    assert_eq!(ann.bbox, p.bbox());
    assert_eq!(ann.keypoints.visibility(), 2);
}

#[test]
fn degenerate_warp_fails_without_returning_an_image() {
    let c = Compositor::new(CompositorConfig {
        perspective_probability: 1.0,
        ..plain_config()
    })
    .unwrap();
    let mut rng = rng_from_seed(4);
    let err = c
        .composite(&mut rng, RgbImage::new(64, 64), &object(1, 30), 1)
        .unwrap_err();
    assert!(matches!(err, PasteError::DegenerateGeometry(_)));
}
