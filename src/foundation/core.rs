use image::RgbaImage;

use crate::foundation::error::{PasteError, PasteResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, Point};

/// Four corners of a quadrilateral, clockwise from top-left in image coordinates.
///
/// Convexity is not enforced by construction; see [`CornerQuad::is_convex_clockwise`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerQuad {
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
}

impl CornerQuad {
    /// Build a quad from points ordered top-left, top-right, bottom-right, bottom-left.
    pub fn new(points: [Point; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = points;
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Pixel-index corners of a `width x height` raster: `(0,0)` to `(w-1,h-1)`.
    pub fn pixel_corners(width: u32, height: u32) -> Self {
        let x1 = f64::from(width) - 1.0;
        let y1 = f64::from(height) - 1.0;
        Self::new([
            Point::new(0.0, 0.0),
            Point::new(x1, 0.0),
            Point::new(x1, y1),
            Point::new(0.0, y1),
        ])
    }

    /// Corners in winding order.
    pub fn points(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Shoelace area; positive for clockwise winding with y pointing down.
    pub fn signed_area(&self) -> f64 {
        let p = self.points();
        let mut acc = 0.0;
        for i in 0..4 {
            let a = p[i];
            let b = p[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc * 0.5
    }

    /// True when every turn is strictly clockwise (y down), i.e. the quad is convex and
    /// not self-intersecting.
    pub fn is_convex_clockwise(&self) -> bool {
        let p = self.points();
        (0..4).all(|i| {
            let a = p[i];
            let b = p[(i + 1) % 4];
            let c = p[(i + 2) % 4];
            let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
            cross > 1e-9
        })
    }
}

/// Premultiplied RGBA8 raster used for geometric resampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes (`width * height * 4`).
    pub data: Vec<u8>,
}

impl PremulImage {
    /// Fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Premultiply a straight-alpha RGBA image.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert back to straight alpha.
    pub fn into_rgba(self) -> PasteResult<RgbaImage> {
        let Self {
            width,
            height,
            mut data,
        } = self;
        unpremultiply_rgba8_in_place(&mut data);
        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| PasteError::invalid_image("premultiplied buffer does not match size"))
    }

    /// Pixel at `(x, y)`; callers keep coordinates in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let v = (u32::from(*c) * 255 + a / 2) / a;
            *c = v.min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
