//! Single-image compositing pipeline.

use image::{RgbImage, RgbaImage};
use rand::Rng;

use crate::annotation::record::{CompositeAnnotation, Placement};
use crate::compose::paste::paste_over;
use crate::compose::scale::{random_placement, select_object_size};
use crate::config::CompositorConfig;
use crate::effects::jitter::random_photometric;
use crate::foundation::core::PremulImage;
use crate::foundation::error::{PasteError, PasteResult};
use crate::foundation::rng::chance;
use crate::transform::affine::random_rotation;
use crate::transform::resize::resize_premul;
use crate::transform::warp::random_perspective;

/// Output of one composite call.
#[derive(Clone, Debug)]
pub struct Composite {
    /// The background, with the object pasted when a paste happened.
    pub image: RgbImage,
    /// Exactly one annotation per call.
    pub annotations: Vec<CompositeAnnotation>,
    /// Pasted rectangle, `None` when nothing was pasted.
    pub placement: Option<Placement>,
}

/// Pastes randomly transformed objects onto backgrounds.
///
/// A `Compositor` holds only its validated configuration; all randomness comes from the
/// generator passed to [`Compositor::composite`], so one instance can be shared by many
/// workers that each own their generator.
#[derive(Clone, Debug)]
pub struct Compositor {
    config: CompositorConfig,
}

impl Compositor {
    /// Validate `config` and build a compositor.
    pub fn new(config: CompositorConfig) -> PasteResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Produce one composited image and its annotation.
    ///
    /// Steps: paste decision, photometric jitter and flip, rotation, optional perspective
    /// warp, size selection, placement, paste, annotation. The background is only written
    /// after every fallible step succeeded, so an error never leaves a half-pasted image
    /// behind.
    #[tracing::instrument(skip(self, rng, background, object), fields(
        bg_w = background.width(),
        bg_h = background.height(),
        obj_w = object.width(),
        obj_h = object.height(),
    ))]
    pub fn composite<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut background: RgbImage,
        object: &RgbaImage,
        image_id: u64,
    ) -> PasteResult<Composite> {
        let (bg_w, bg_h) = background.dimensions();
        if bg_w == 0 || bg_h == 0 {
            return Err(PasteError::invalid_image(format!(
                "background has zero area ({bg_w}x{bg_h})"
            )));
        }
        if object.width() == 0 || object.height() == 0 {
            return Err(PasteError::invalid_image(format!(
                "object has zero area ({}x{})",
                object.width(),
                object.height()
            )));
        }

        let cfg = &self.config;
        if !chance(rng, cfg.paste_probability) {
            tracing::debug!("no paste");
            return Ok(Composite {
                image: background,
                annotations: vec![CompositeAnnotation::absent(image_id, cfg.category_id)],
                placement: None,
            });
        }

        let mut jittered = object.clone();
        random_photometric(rng, &mut jittered, &cfg.jitter, cfg.flip_probability);

        let rotated = random_rotation(
            rng,
            &PremulImage::from_rgba(&jittered),
            cfg.rotation_max_radians,
        );
        let warped = random_perspective(
            rng,
            rotated,
            cfg.perspective_probability,
            cfg.distortion_scale,
        )?;

        let (w, h) = select_object_size(
            rng,
            bg_w,
            bg_h,
            warped.aspect(),
            cfg.min_object_fraction,
            cfg.max_object_fraction,
        );
        let resized = resize_premul(&warped, w, h)?;
        let placement = random_placement(rng, bg_w, bg_h, w, h);

        paste_over(&mut background, &resized, placement.x, placement.y);
        tracing::debug!(?placement, "pasted object");

        Ok(Composite {
            image: background,
            annotations: vec![CompositeAnnotation::pasted(
                image_id,
                cfg.category_id,
                &placement,
            )],
            placement: Some(placement),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
