//! Per-composite ground truth.

use crate::foundation::error::{PasteError, PasteResult};

/// Keypoint visibility: absent.
pub const VISIBILITY_ABSENT: u8 = 0;
/// Keypoint visibility: labeled and visible.
pub const VISIBILITY_VISIBLE: u8 = 2;

/// `[x, y, visibility]`, serialized as a three-element array.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keypoint(pub f64, pub f64, pub u8);

impl Keypoint {
    /// Placeholder for "no object".
    pub const ABSENT: Self = Self(0.0, 0.0, VISIBILITY_ABSENT);

    /// Visibility flag.
    pub fn visibility(&self) -> u8 {
        self.2
    }
}

/// Pasted rectangle on the background, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Object width after resize.
    pub width: u32,
    /// Object height after resize.
    pub height: u32,
}

impl Placement {
    /// Center of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// `[x, y, w, h]`.
    pub fn bbox(&self) -> [f64; 4] {
        [
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.width),
            f64::from(self.height),
        ]
    }
}

/// One COCO-style annotation for a composited image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositeAnnotation {
    /// Image this annotation belongs to.
    pub image_id: u64,
    /// Object category.
    pub category_id: u32,
    /// Center keypoint.
    pub keypoints: Keypoint,
    /// 1 when an object was pasted, 0 otherwise.
    pub num_keypoints: u32,
    /// `[x, y, w, h]`, all zero when nothing was pasted.
    pub bbox: [f64; 4],
    /// Always 0.
    pub iscrowd: u8,
    /// Placeholder; no masks are produced.
    pub segmentation: serde_json::Value,
}

impl CompositeAnnotation {
    /// Annotation for a pasted object.
    pub fn pasted(image_id: u64, category_id: u32, placement: &Placement) -> Self {
        let (cx, cy) = placement.center();
        Self {
            image_id,
            category_id,
            keypoints: Keypoint(cx, cy, VISIBILITY_VISIBLE),
            num_keypoints: 1,
            bbox: placement.bbox(),
            iscrowd: 0,
            segmentation: empty_segmentation(),
        }
    }

    /// All-zero annotation for a call that pasted nothing.
    pub fn absent(image_id: u64, category_id: u32) -> Self {
        Self {
            image_id,
            category_id,
            keypoints: Keypoint::ABSENT,
            num_keypoints: 0,
            bbox: [0.0; 4],
            iscrowd: 0,
            segmentation: empty_segmentation(),
        }
    }

    /// True when an object was pasted.
    pub fn is_visible(&self) -> bool {
        self.num_keypoints > 0
    }

    /// Serialize a list of annotations as pretty JSON.
    pub fn list_to_json(anns: &[Self]) -> PasteResult<String> {
        serde_json::to_string_pretty(anns).map_err(|e| PasteError::serde(e.to_string()))
    }
}

fn empty_segmentation() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/record.rs"]
mod tests;
