//! pastekit generates synthetic detection data.
//!
//! Given a background photograph and an object image, a [`Compositor`] pastes a randomly
//! transformed copy of the object onto the background and reports where it landed as a
//! COCO-style annotation with a single center keypoint.
//!
//! # Per-call pipeline
//!
//! 1. **Decide**: paste with probability `paste_probability`, else emit an all-zero annotation
//! 2. **Jitter**: brightness/contrast/saturation/hue in shuffled order, optional horizontal flip
//! 3. **Rotate**: uniform angle, bicubic, canvas grown to fit
//! 4. **Warp**: optional random perspective, coefficients from [`solve_perspective`]
//! 5. **Scale and place**: size relative to the background, uniform offset inside it
//! 6. **Paste and annotate**
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: every stochastic step draws from a caller-owned generator, so a
//!   fixed seed reproduces images and annotations byte for byte.
//! - **Premultiplied resampling**: geometric steps run on premultiplied RGBA8.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod annotation;
mod assets;
mod compose;
mod config;
mod effects;
mod foundation;
mod pipeline;

/// Geometric transforms used by the compositor.
pub mod transform;

pub use annotation::coco::{AnnotationRecord, CategoryRecord, CocoDataset, ImageRecord};
pub use annotation::record::{
    CompositeAnnotation, Keypoint, Placement, VISIBILITY_ABSENT, VISIBILITY_VISIBLE,
};
pub use assets::decode::{
    decode_image, is_supported_image, load_background, load_image, load_object,
};
pub use compose::compositor::{Composite, Compositor};
pub use compose::paste::{over_opaque, paste_over};
pub use compose::scale::{
    fraction_range, random_placement, select_object_size, size_from_height, size_from_width,
};
pub use config::{ColorJitterConfig, CompositorConfig};
pub use effects::jitter::{ColorAdjust, random_photometric, sample_color_jitter};
pub use foundation::core::{Affine, CornerQuad, Point, PremulImage};
pub use foundation::error::{PasteError, PasteResult};
pub use foundation::rng::{
    PasteRng, chance, derive_item_seed, rng_from_seed, uniform_f64, uniform_u32_inclusive,
    uniform_u32_or_low,
};
pub use pipeline::{BatchItem, BatchOpts, generate_batch};
pub use transform::perspective::{PerspectiveCoefficients, solve_perspective};
