//! Grayscale conversion using BT.601 luma weights
//! Y = 0.299*R + 0.587*G + 0.114*B

use crate::models::PixelBuffer;
use rayon::prelude::*;

/// Luma of a single pixel, rounded to the nearest integer.
///
/// This is the one brightness formula in the crate: mean-brightness checks
/// and adaptive thresholding reuse it rather than weighting channels
/// differently.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    y.round().min(255.0) as u8
}

/// Convert a buffer to grayscale, writing the luma into R, G and B.
/// Alpha is left unchanged. Returns a new buffer of the same dimensions.
pub fn to_grayscale(src: &PixelBuffer) -> PixelBuffer {
    let mut out = src.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        let y = luma(px[0], px[1], px[2]);
        px[0] = y;
        px[1] = y;
        px[2] = y;
    }
    out
}

/// Convert to grayscale with rows processed in parallel.
/// Output is identical to [`to_grayscale`].
pub fn to_grayscale_parallel(src: &PixelBuffer) -> PixelBuffer {
    if src.width() == 0 {
        return src.clone();
    }
    let row_bytes = src.width() * 4;
    let mut out = src.clone();
    out.data_mut().par_chunks_mut(row_bytes).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            let y = luma(px[0], px[1], px[2]);
            px[0] = y;
            px[1] = y;
            px[2] = y;
        }
    });
    out
}
