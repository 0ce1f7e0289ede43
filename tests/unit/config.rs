use super::*;

#[test]
fn defaults_match_documented_values() {
    let cfg = CompositorConfig::default();
    assert_eq!(cfg.paste_probability, 0.8);
    assert_eq!(cfg.perspective_probability, 0.6);
    assert_eq!(cfg.distortion_scale, 0.5);
    assert!((cfg.rotation_max_radians - std::f64::consts::PI / 6.0).abs() < 1e-15);
    assert_eq!(cfg.min_object_fraction, 0.0625);
    assert_eq!(cfg.max_object_fraction, 0.5);
    cfg.validate().unwrap();
}

#[test]
fn default_jitter_factor_ranges() {
    let j = ColorJitterConfig::default();
    let (lo, hi) = ColorJitterConfig::factor_range(j.brightness);
    assert!((lo - 0.6).abs() < 1e-12 && (hi - 1.4).abs() < 1e-12);
    let (lo, hi) = ColorJitterConfig::factor_range(j.contrast);
    assert!((lo - 0.8).abs() < 1e-12 && (hi - 1.2).abs() < 1e-12);
    let (lo, hi) = ColorJitterConfig::factor_range(j.saturation);
    assert!((lo - 0.9).abs() < 1e-12 && (hi - 1.1).abs() < 1e-12);
    assert_eq!(ColorJitterConfig::factor_range(3.0).0, 0.0);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = CompositorConfig::from_json_str(r#"{ "paste_probability": 1.0 }"#).unwrap();
    assert_eq!(cfg.paste_probability, 1.0);
    assert_eq!(cfg.perspective_probability, 0.6);
    assert_eq!(cfg.jitter, ColorJitterConfig::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = CompositorConfig::from_json_str(r#"{ "paste_prob": 1.0 }"#).unwrap_err();
    assert!(matches!(err, PasteError::Serde(_)));
}

#[test]
fn out_of_range_probability_is_configuration_error() {
    let err = CompositorConfig::from_json_str(r#"{ "perspective_probability": 1.5 }"#)
        .unwrap_err();
    assert!(matches!(err, PasteError::Configuration(_)));
    assert!(err.to_string().contains("perspective_probability"));
}

#[test]
fn invalid_ranges_are_caught() {
    let bad = [
        CompositorConfig {
            paste_probability: -0.1,
            ..CompositorConfig::default()
        },
        CompositorConfig {
            distortion_scale: 1.2,
            ..CompositorConfig::default()
        },
        CompositorConfig {
            rotation_max_radians: f64::NAN,
            ..CompositorConfig::default()
        },
        CompositorConfig {
            min_object_fraction: 0.0,
            ..CompositorConfig::default()
        },
        CompositorConfig {
            min_object_fraction: 0.6,
            max_object_fraction: 0.5,
            ..CompositorConfig::default()
        },
        CompositorConfig {
            jitter: ColorJitterConfig {
                hue: 0.7,
                ..ColorJitterConfig::default()
            },
            ..CompositorConfig::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(PasteError::Configuration(_))));
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = CompositorConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, PasteError::Other(_)));
}
