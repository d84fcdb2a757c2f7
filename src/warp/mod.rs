//! Bilinear resampling and perspective warping
//!
//! - Point sampling at fractional coordinates with edge clamping
//! - Quadrilateral-to-rectangle dewarping via inverse bilinear mapping

pub mod perspective;
pub mod resample;

pub use perspective::{warp_perspective, warp_perspective_parallel};
pub use resample::bilinear_sample;
