//! Fixed black-and-white enhancement pipeline
//!
//! Turns a color or grayscale photo of a document into a clean binarized
//! scan: brightness check, optional inversion for negative/dark-background
//! input, grayscale conversion, bilateral smoothing, adaptive thresholding.
//! The stage parameters are fixed constants tuned for typical document
//! photographs; nothing is exposed to the caller.

use crate::filters::bilateral::{
    DEFAULT_DIAMETER, DEFAULT_SIGMA_COLOR, DEFAULT_SIGMA_SPACE, bilateral_filter,
    bilateral_filter_parallel,
};
use crate::filters::brightness::{invert, mean_luma};
use crate::filters::grayscale::{to_grayscale, to_grayscale_parallel};
use crate::filters::threshold::{
    DEFAULT_BLOCK_SIZE, DEFAULT_OFFSET, adaptive_threshold, adaptive_threshold_parallel,
};
use crate::models::PixelBuffer;

/// Inputs with a mean luma below this are treated as negatives and inverted
/// before enhancement, so thresholding always sees dark text on a light
/// background.
pub const INVERSION_MEAN_CUTOFF: f64 = 120.0;

/// Enhance a photographed document into a binarized black-and-white scan.
/// Returns a new buffer of the same dimensions; the input is not mutated.
pub fn enhance(buffer: &PixelBuffer) -> PixelBuffer {
    let working;
    let source = if mean_luma(buffer) < INVERSION_MEAN_CUTOFF {
        working = invert(buffer);
        &working
    } else {
        buffer
    };

    let gray = to_grayscale(source);
    let smoothed = bilateral_filter(&gray, DEFAULT_DIAMETER, DEFAULT_SIGMA_COLOR, DEFAULT_SIGMA_SPACE);
    adaptive_threshold(&smoothed, DEFAULT_BLOCK_SIZE, DEFAULT_OFFSET)
}

/// Enhancement with each stage's rows processed in parallel.
/// Output is identical to [`enhance`].
pub fn enhance_parallel(buffer: &PixelBuffer) -> PixelBuffer {
    let working;
    let source = if mean_luma(buffer) < INVERSION_MEAN_CUTOFF {
        working = invert(buffer);
        &working
    } else {
        buffer
    };

    let gray = to_grayscale_parallel(source);
    let smoothed =
        bilateral_filter_parallel(&gray, DEFAULT_DIAMETER, DEFAULT_SIGMA_COLOR, DEFAULT_SIGMA_SPACE);
    adaptive_threshold_parallel(&smoothed, DEFAULT_BLOCK_SIZE, DEFAULT_OFFSET)
}
