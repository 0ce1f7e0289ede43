//! Geometric transforms: perspective solve, rotation, warping and resampling.

/// Rotation onto an expanded canvas.
pub mod affine;
/// Perspective coefficient solver.
pub mod perspective;
/// Premultiplied resizing.
pub mod resize;
/// Bicubic sampling.
pub mod sample;
/// Random perspective warp.
pub mod warp;
