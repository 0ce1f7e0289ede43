//! Resizing premultiplied rasters.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::foundation::core::PremulImage;
use crate::foundation::error::{PasteError, PasteResult};

/// Resize to `width x height` with a Catmull-Rom filter.
///
/// Filtering runs on premultiplied channels so transparent pixels never tint their neighbors.
pub fn resize_premul(img: &PremulImage, width: u32, height: u32) -> PasteResult<PremulImage> {
    if width == 0 || height == 0 {
        return Err(PasteError::invalid_image(format!(
            "cannot resize to {width}x{height}"
        )));
    }
    if (width, height) == (img.width, img.height) {
        return Ok(img.clone());
    }

    let buf = RgbaImage::from_raw(img.width, img.height, img.data.clone())
        .ok_or_else(|| PasteError::invalid_image("premultiplied buffer does not match size"))?;
    let mut data = imageops::resize(&buf, width, height, FilterType::CatmullRom).into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
    Ok(PremulImage {
        width,
        height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
