//! COCO-style dataset file assembled from composite results.

use std::path::Path;

use anyhow::Context as _;

use crate::annotation::record::{CompositeAnnotation, Keypoint};
use crate::foundation::error::{PasteError, PasteResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One entry of the `images` table.
pub struct ImageRecord {
    /// Image id referenced by annotations.
    pub id: u64,
    /// File name relative to the image directory.
    pub file_name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A [`CompositeAnnotation`] with its dataset-wide id.
pub struct AnnotationRecord {
    /// Unique annotation id, starting at 1.
    pub id: u64,
    /// Owning image.
    pub image_id: u64,
    /// Object category.
    pub category_id: u32,
    /// Center keypoint.
    pub keypoints: Keypoint,
    /// 1 when visible.
    pub num_keypoints: u32,
    /// `[x, y, w, h]`.
    pub bbox: [f64; 4],
    /// Bounding-box area.
    pub area: f64,
    /// Always 0.
    pub iscrowd: u8,
    /// Placeholder.
    pub segmentation: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One entry of the `categories` table.
pub struct CategoryRecord {
    /// Category id.
    pub id: u32,
    /// Category name.
    pub name: String,
    /// Parent category name.
    pub supercategory: String,
    /// Keypoint names; a single center point here.
    pub keypoints: Vec<String>,
    /// Keypoint skeleton edges; empty for one point.
    pub skeleton: Vec<[u32; 2]>,
}

impl CategoryRecord {
    /// Category with a single `center` keypoint.
    pub fn object(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            supercategory: "object".to_string(),
            keypoints: vec!["center".to_string()],
            skeleton: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// `images`, `annotations` and `categories` tables.
pub struct CocoDataset {
    /// Image table.
    pub images: Vec<ImageRecord>,
    /// Annotation table.
    pub annotations: Vec<AnnotationRecord>,
    /// Category table.
    pub categories: Vec<CategoryRecord>,
}

impl CocoDataset {
    /// Empty dataset with the given categories.
    pub fn new(categories: Vec<CategoryRecord>) -> Self {
        Self {
            images: Vec::new(),
            annotations: Vec::new(),
            categories,
        }
    }

    /// Append an image and its annotations; annotation ids continue from the last one.
    pub fn push(&mut self, image: ImageRecord, anns: &[CompositeAnnotation]) -> PasteResult<()> {
        if self.images.iter().any(|i| i.id == image.id) {
            return Err(PasteError::configuration(format!(
                "duplicate image id {}",
                image.id
            )));
        }
        if let Some(ann) = anns.iter().find(|a| a.image_id != image.id) {
            return Err(PasteError::configuration(format!(
                "annotation for image {} pushed with image {}",
                ann.image_id, image.id
            )));
        }
        for ann in anns {
            let id = self.annotations.len() as u64 + 1;
            self.annotations.push(AnnotationRecord {
                id,
                image_id: ann.image_id,
                category_id: ann.category_id,
                keypoints: ann.keypoints,
                num_keypoints: ann.num_keypoints,
                bbox: ann.bbox,
                area: ann.bbox[2] * ann.bbox[3],
                iscrowd: ann.iscrowd,
                segmentation: ann.segmentation.clone(),
            });
        }
        self.images.push(image);
        Ok(())
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> PasteResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PasteError::serde(e.to_string()))
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn write_json(&self, path: &Path) -> PasteResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/coco.rs"]
mod tests;
