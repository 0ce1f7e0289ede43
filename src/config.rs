//! Compositor configuration: defaults, JSON loading and validation.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{PasteError, PasteResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Knobs for one composite call.
///
/// Every field has a default, so a JSON config only needs the keys it overrides.
/// [`CompositorConfig::validate`] runs on load and when a [`crate::Compositor`] is built.
pub struct CompositorConfig {
    /// Chance that an object is pasted at all.
    pub paste_probability: f64,
    /// Chance that the object gets a random perspective warp.
    pub perspective_probability: f64,
    /// Corner perturbation as a fraction of the half extent, in `[0, 1]`.
    pub distortion_scale: f64,
    /// Rotation angle is drawn from `[-rotation_max_radians, rotation_max_radians]`.
    pub rotation_max_radians: f64,
    /// Smallest object side as a fraction of the background side.
    pub min_object_fraction: f64,
    /// Largest (exclusive) object side as a fraction of the background side.
    pub max_object_fraction: f64,
    /// Chance of a horizontal flip.
    pub flip_probability: f64,
    /// Photometric jitter magnitudes.
    pub jitter: ColorJitterConfig,
    /// Category stamped into every annotation.
    pub category_id: u32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            paste_probability: 0.8,
            perspective_probability: 0.6,
            distortion_scale: 0.5,
            rotation_max_radians: std::f64::consts::FRAC_PI_6,
            min_object_fraction: 1.0 / 16.0,
            max_object_fraction: 0.5,
            flip_probability: 0.5,
            jitter: ColorJitterConfig::default(),
            category_id: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Jitter magnitudes.
///
/// Brightness, contrast and saturation factors are drawn from `[max(0, 1-m), 1+m]`;
/// the hue shift is drawn from `[-hue, hue]` (fraction of a full turn).
pub struct ColorJitterConfig {
    /// Brightness magnitude.
    pub brightness: f64,
    /// Contrast magnitude.
    pub contrast: f64,
    /// Saturation magnitude.
    pub saturation: f64,
    /// Hue shift magnitude, at most 0.5.
    pub hue: f64,
}

impl Default for ColorJitterConfig {
    fn default() -> Self {
        Self {
            brightness: 0.4,
            contrast: 0.2,
            saturation: 0.1,
            hue: 0.01,
        }
    }
}

impl ColorJitterConfig {
    /// No photometric change.
    pub fn none() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            hue: 0.0,
        }
    }

    /// Factor range `[max(0, 1-m), 1+m]` for a magnitude.
    pub fn factor_range(magnitude: f64) -> (f64, f64) {
        ((1.0 - magnitude).max(0.0), 1.0 + magnitude)
    }
}

impl CompositorConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(s: &str) -> PasteResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| PasteError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> PasteResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check every range; the first violation wins.
    pub fn validate(&self) -> PasteResult<()> {
        for (name, p) in [
            ("paste_probability", self.paste_probability),
            ("perspective_probability", self.perspective_probability),
            ("flip_probability", self.flip_probability),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(PasteError::configuration(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }

        if !self.distortion_scale.is_finite() || !(0.0..=1.0).contains(&self.distortion_scale) {
            return Err(PasteError::configuration(format!(
                "distortion_scale must be within [0, 1], got {}",
                self.distortion_scale
            )));
        }
        if !self.rotation_max_radians.is_finite()
            || !(0.0..=std::f64::consts::PI).contains(&self.rotation_max_radians)
        {
            return Err(PasteError::configuration(format!(
                "rotation_max_radians must be within [0, pi], got {}",
                self.rotation_max_radians
            )));
        }

        for (name, f) in [
            ("min_object_fraction", self.min_object_fraction),
            ("max_object_fraction", self.max_object_fraction),
        ] {
            if !f.is_finite() || f <= 0.0 || f > 1.0 {
                return Err(PasteError::configuration(format!(
                    "{name} must be within (0, 1], got {f}"
                )));
            }
        }
        if self.min_object_fraction > self.max_object_fraction {
            return Err(PasteError::configuration(
                "min_object_fraction must be <= max_object_fraction",
            ));
        }

        self.jitter.validate()
    }
}

impl ColorJitterConfig {
    fn validate(&self) -> PasteResult<()> {
        for (name, m) in [
            ("jitter.brightness", self.brightness),
            ("jitter.contrast", self.contrast),
            ("jitter.saturation", self.saturation),
            ("jitter.hue", self.hue),
        ] {
            if !m.is_finite() || m < 0.0 {
                return Err(PasteError::configuration(format!(
                    "{name} must be finite and >= 0, got {m}"
                )));
            }
        }
        if self.hue > 0.5 {
            return Err(PasteError::configuration("jitter.hue must be <= 0.5"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
