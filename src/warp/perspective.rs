//! Quadrilateral-to-rectangle perspective warp
//!
//! Every destination pixel maps back into the source through a bilinear
//! blend of the four corner correspondences and is bilinearly resampled
//! there. The mapping is exact for parallelograms and approximate for
//! general quadrilaterals; it deliberately stays an inverse bilinear
//! interpolation rather than a projective homography.

use crate::models::{PixelBuffer, Quad};
use crate::warp::resample::bilinear_sample;
use rayon::prelude::*;

/// Warp the region under `corners` onto a `dest_width` x `dest_height`
/// rectangle. Every destination pixel is written exactly once.
///
/// Destination dimensions of 1 sample the corresponding first corner edge
/// (the normalized coordinate is defined as 0 for a 1-pixel axis). A zero
/// dimension yields an empty buffer.
pub fn warp_perspective(
    source: &PixelBuffer,
    corners: &Quad,
    dest_width: usize,
    dest_height: usize,
) -> PixelBuffer {
    let mut out = PixelBuffer::new(dest_width, dest_height);
    if dest_width == 0 {
        return out;
    }
    let row_bytes = dest_width * 4;
    for (y, row) in out.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        warp_row(source, corners, dest_width, dest_height, y, row);
    }
    out
}

/// Perspective warp with rows processed in parallel.
/// Output is identical to [`warp_perspective`].
pub fn warp_perspective_parallel(
    source: &PixelBuffer,
    corners: &Quad,
    dest_width: usize,
    dest_height: usize,
) -> PixelBuffer {
    let mut out = PixelBuffer::new(dest_width, dest_height);
    if dest_width == 0 {
        return out;
    }
    let row_bytes = dest_width * 4;
    out.data_mut()
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            warp_row(source, corners, dest_width, dest_height, y, row);
        });
    out
}

fn warp_row(
    source: &PixelBuffer,
    corners: &Quad,
    dest_width: usize,
    dest_height: usize,
    y: usize,
    row: &mut [u8],
) {
    let v = if dest_height > 1 {
        y as f32 / (dest_height - 1) as f32
    } else {
        0.0
    };
    for x in 0..dest_width {
        let u = if dest_width > 1 {
            x as f32 / (dest_width - 1) as f32
        } else {
            0.0
        };
        let src = corners.map(u, v);
        let rgba = bilinear_sample(source, src.x, src.y).to_rgba();
        row[x * 4..x * 4 + 4].copy_from_slice(&rgba);
    }
}
