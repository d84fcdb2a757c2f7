//! Adaptive mean thresholding
//!
//! Binarizes against a local neighborhood mean instead of one global cutoff,
//! so a shading gradient across a photographed page does not swallow half of
//! it in black.

use crate::filters::grayscale::luma;
use crate::models::PixelBuffer;
use rayon::prelude::*;

/// Default thresholding window size
pub const DEFAULT_BLOCK_SIZE: usize = 15;
/// Default offset subtracted from the local mean
pub const DEFAULT_OFFSET: f32 = 8.0;

/// Binarize a buffer against its local mean luma.
///
/// Every output channel is either 0 or 255 and alpha is forced to 255. The
/// window shrinks at the buffer edges: out-of-bounds neighbors are skipped,
/// and the mean is taken over however many in-bounds samples exist.
pub fn adaptive_threshold(src: &PixelBuffer, block_size: usize, offset: f32) -> PixelBuffer {
    if src.width() == 0 {
        return src.clone();
    }
    let radius = (block_size / 2) as isize;

    let mut out = PixelBuffer::new(src.width(), src.height());
    let row_bytes = src.width() * 4;
    for (y, row) in out.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        threshold_row(src, y, radius, offset, row);
    }
    out
}

/// Adaptive thresholding with rows processed in parallel.
/// Output is identical to [`adaptive_threshold`].
pub fn adaptive_threshold_parallel(src: &PixelBuffer, block_size: usize, offset: f32) -> PixelBuffer {
    if src.width() == 0 {
        return src.clone();
    }
    let radius = (block_size / 2) as isize;

    let mut out = PixelBuffer::new(src.width(), src.height());
    let row_bytes = src.width() * 4;
    out.data_mut()
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            threshold_row(src, y, radius, offset, row);
        });
    out
}

fn threshold_row(src: &PixelBuffer, y: usize, radius: isize, offset: f32, row: &mut [u8]) {
    for x in 0..src.width() {
        let value = threshold_pixel(src, x, y, radius, offset);
        row[x * 4..x * 4 + 4].copy_from_slice(&[value, value, value, 255]);
    }
}

fn threshold_pixel(src: &PixelBuffer, x: usize, y: usize, radius: isize, offset: f32) -> u8 {
    let width = src.width();
    let height = src.height();
    let data = src.data();

    let mut sum: u32 = 0;
    let mut count: u32 = 0;
    for dy in -radius..=radius {
        let ny = y as isize + dy;
        if ny < 0 || ny >= height as isize {
            continue;
        }
        for dx in -radius..=radius {
            let nx = x as isize + dx;
            if nx < 0 || nx >= width as isize {
                continue;
            }
            let idx = (ny as usize * width + nx as usize) * 4;
            sum += luma(data[idx], data[idx + 1], data[idx + 2]) as u32;
            count += 1;
        }
    }

    let mean = sum as f32 / count as f32;
    let center = (y * width + x) * 4;
    let center_luma = luma(data[center], data[center + 1], data[center + 2]) as f32;

    if center_luma > mean - offset { 255 } else { 0 }
}
