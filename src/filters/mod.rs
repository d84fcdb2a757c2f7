//! Per-pixel image filters
//!
//! This module provides the enhancement building blocks:
//! - Grayscale conversion (shared BT.601 luma formula)
//! - Brightness statistics and channel inversion
//! - Edge-preserving bilateral smoothing
//! - Adaptive mean thresholding

pub mod bilateral;
pub mod brightness;
pub mod grayscale;
pub mod threshold;
