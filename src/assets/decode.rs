use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::foundation::error::{PasteError, PasteResult};

/// Decode encoded image bytes; zero-area images are rejected.
pub fn decode_image(bytes: &[u8]) -> PasteResult<DynamicImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PasteError::invalid_image(format!("decode image from memory: {e}")))?;
    ensure_area(&img, "decoded image")?;
    Ok(img)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> PasteResult<DynamicImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        PasteError::InvalidImage(msg) => {
            PasteError::invalid_image(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

/// Background as opaque RGB8.
pub fn load_background(path: &Path) -> PasteResult<RgbImage> {
    Ok(load_image(path)?.to_rgb8())
}

/// Object as straight-alpha RGBA8; images without alpha become fully opaque.
pub fn load_object(path: &Path) -> PasteResult<RgbaImage> {
    Ok(load_image(path)?.to_rgba8())
}

/// True for file extensions the `image` crate can decode.
pub fn is_supported_image(path: &Path) -> bool {
    image::ImageFormat::from_path(path)
        .map(|f| f.can_read())
        .unwrap_or(false)
}

fn ensure_area(img: &DynamicImage, what: &str) -> PasteResult<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(PasteError::invalid_image(format!(
            "{what} has zero area ({}x{})",
            img.width(),
            img.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
