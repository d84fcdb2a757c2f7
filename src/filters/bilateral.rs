//! Edge-preserving bilateral smoothing
//!
//! Each output pixel is a weighted average of its window neighbors where the
//! weight combines spatial distance and color similarity. Flat regions are
//! smoothed while sharp color edges survive, which keeps printed glyph
//! outlines intact ahead of thresholding.

use crate::models::PixelBuffer;
use rayon::prelude::*;

/// Default filter window diameter
pub const DEFAULT_DIAMETER: usize = 9;
/// Default color-similarity sigma
pub const DEFAULT_SIGMA_COLOR: f32 = 75.0;
/// Default spatial sigma
pub const DEFAULT_SIGMA_SPACE: f32 = 75.0;

/// Apply a bilateral filter, returning a new buffer of the same dimensions.
///
/// Neighbors outside the buffer are skipped entirely (the window shrinks at
/// the edges rather than clamping). Alpha is copied from the center pixel.
pub fn bilateral_filter(
    src: &PixelBuffer,
    diameter: usize,
    sigma_color: f32,
    sigma_space: f32,
) -> PixelBuffer {
    if src.width() == 0 {
        return src.clone();
    }
    let radius = (diameter / 2) as isize;
    let two_sigma_color_sq = 2.0 * sigma_color * sigma_color;
    let two_sigma_space_sq = 2.0 * sigma_space * sigma_space;

    let mut out = PixelBuffer::new(src.width(), src.height());
    let row_bytes = src.width() * 4;
    for (y, row) in out.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        filter_row(src, y, radius, two_sigma_color_sq, two_sigma_space_sq, row);
    }
    out
}

/// Bilateral filter with rows processed in parallel.
/// Output is identical to [`bilateral_filter`].
pub fn bilateral_filter_parallel(
    src: &PixelBuffer,
    diameter: usize,
    sigma_color: f32,
    sigma_space: f32,
) -> PixelBuffer {
    if src.width() == 0 {
        return src.clone();
    }
    let radius = (diameter / 2) as isize;
    let two_sigma_color_sq = 2.0 * sigma_color * sigma_color;
    let two_sigma_space_sq = 2.0 * sigma_space * sigma_space;

    let mut out = PixelBuffer::new(src.width(), src.height());
    let row_bytes = src.width() * 4;
    out.data_mut()
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            filter_row(src, y, radius, two_sigma_color_sq, two_sigma_space_sq, row);
        });
    out
}

fn filter_row(
    src: &PixelBuffer,
    y: usize,
    radius: isize,
    two_sigma_color_sq: f32,
    two_sigma_space_sq: f32,
    row: &mut [u8],
) {
    for x in 0..src.width() {
        let rgba = filter_pixel(src, x, y, radius, two_sigma_color_sq, two_sigma_space_sq);
        row[x * 4..x * 4 + 4].copy_from_slice(&rgba);
    }
}

fn filter_pixel(
    src: &PixelBuffer,
    x: usize,
    y: usize,
    radius: isize,
    two_sigma_color_sq: f32,
    two_sigma_space_sq: f32,
) -> [u8; 4] {
    let width = src.width();
    let height = src.height();
    let data = src.data();

    let center = (y * width + x) * 4;
    let center_r = data[center] as f32;
    let center_g = data[center + 1] as f32;
    let center_b = data[center + 2] as f32;

    let mut total_weight = 0.0f32;
    let mut sum_r = 0.0f32;
    let mut sum_g = 0.0f32;
    let mut sum_b = 0.0f32;

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
            let neighbor_r = data[idx] as f32;
            let neighbor_g = data[idx + 1] as f32;
            let neighbor_b = data[idx + 2] as f32;

            let spatial_dist_sq = (dx * dx + dy * dy) as f32;
            let spatial_weight = (-spatial_dist_sq / two_sigma_space_sq).exp();

            let dr = center_r - neighbor_r;
            let dg = center_g - neighbor_g;
            let db = center_b - neighbor_b;
            let color_dist_sq = dr * dr + dg * dg + db * db;
            let color_weight = (-color_dist_sq / two_sigma_color_sq).exp();

            let weight = spatial_weight * color_weight;
            total_weight += weight;
            sum_r += neighbor_r * weight;
            sum_g += neighbor_g * weight;
            sum_b += neighbor_b * weight;
        }
    }

    if total_weight == 0.0 {
        // Degenerate window, fall back to the center pixel
        return [
            data[center],
            data[center + 1],
            data[center + 2],
            data[center + 3],
        ];
    }

    [
        (sum_r / total_weight).round().min(255.0) as u8,
        (sum_g / total_weight).round().min(255.0) as u8,
        (sum_b / total_weight).round().min(255.0) as u8,
        data[center + 3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_input_is_fixpoint() {
        let src = PixelBuffer::filled(12, 10, [180, 90, 45, 255]);
        let filtered = bilateral_filter(&src, DEFAULT_DIAMETER, DEFAULT_SIGMA_COLOR, DEFAULT_SIGMA_SPACE);
        assert_eq!(filtered, src);
    }

    #[test]
    fn test_alpha_copied_from_center() {
        let mut src = PixelBuffer::filled(5, 5, [128, 128, 128, 255]);
        src.put(2, 2, [128, 128, 128, 17]);
        let filtered = bilateral_filter(&src, 9, 75.0, 75.0);
        assert_eq!(filtered.get(2, 2)[3], 17);
        assert_eq!(filtered.get(0, 0)[3], 255);
    }

    #[test]
    fn test_smooths_noise_within_region() {
        // A single slightly-off pixel inside a flat region gets pulled
        // toward its surroundings.
        let mut src = PixelBuffer::filled(9, 9, [100, 100, 100, 255]);
        src.put(4, 4, [120, 120, 120, 255]);
        let filtered = bilateral_filter(&src, 9, 75.0, 75.0);
        let center = filtered.get(4, 4);
        assert!(center[0] < 120);
        assert!(center[0] >= 100);
    }

    #[test]
    fn test_preserves_strong_edge() {
        // Left half black, right half white. The edge columns must stay far
        // apart: color weighting keeps averaging within each side.
        let mut src = PixelBuffer::filled(10, 6, [0, 0, 0, 255]);
        for y in 0..6 {
            for x in 5..10 {
                src.put(x, y, [255, 255, 255, 255]);
            }
        }
        let filtered = bilateral_filter(&src, 9, 30.0, 75.0);
        assert!(filtered.get(4, 3)[0] < 60);
        assert!(filtered.get(5, 3)[0] > 195);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut src = PixelBuffer::new(16, 11);
        for (i, px) in src.data_mut().chunks_exact_mut(4).enumerate() {
            px[0] = (i * 31 % 256) as u8;
            px[1] = (i * 17 % 256) as u8;
            px[2] = (i * 5 % 256) as u8;
            px[3] = 255;
        }
        let seq = bilateral_filter(&src, 9, 75.0, 75.0);
        let par = bilateral_filter_parallel(&src, 9, 75.0, 75.0);
        assert_eq!(seq, par);
    }
}
