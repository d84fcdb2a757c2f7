//! File I/O and diagnostic helpers for the CLI and integration tests
//!
//! Decoding and encoding image files lives here, at the boundary: the core
//! algorithms only ever see [`PixelBuffer`] values.

use crate::filters::grayscale::luma;
use crate::models::PixelBuffer;
use std::path::Path;

/// Load an image file as an RGBA pixel buffer.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, image::ImageError> {
    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::from_raw(width as usize, height as usize, rgba.into_raw())
        .expect("decoded RGBA8 length matches its dimensions");
    Ok(buffer)
}

/// Save a pixel buffer to a file; the format is inferred from the extension.
pub fn save_rgba<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<(), image::ImageError> {
    let img = image::RgbaImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .expect("buffer length matches its dimensions");
    img.save(path)
}

/// Summary statistics for the luma of a buffer.
#[derive(Debug, Clone, Copy)]
pub struct LumaStats {
    /// Minimum luma value.
    pub min: u8,
    /// Maximum luma value.
    pub max: u8,
    /// Average luma value.
    pub avg: u8,
}

/// Black-pixel statistics for a binarized buffer.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels (red channel 0).
    pub black_pixels: usize,
    /// Total pixels in the buffer.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute min/max/avg luma for a buffer.
pub fn luma_stats(buffer: &PixelBuffer) -> LumaStats {
    let count = buffer.pixel_count();
    if count == 0 {
        return LumaStats {
            min: 0,
            max: 0,
            avg: 0,
        };
    }
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for px in buffer.data().chunks_exact(4) {
        let y = luma(px[0], px[1], px[2]);
        min = min.min(y);
        max = max.max(y);
        sum += y as u64;
    }
    let avg = (sum / count as u64) as u8;
    LumaStats { min, max, avg }
}

/// Compute black-pixel stats for a binarized buffer.
pub fn binary_stats(buffer: &PixelBuffer) -> BinaryStats {
    let mut black = 0usize;
    for px in buffer.data().chunks_exact(4) {
        if px[0] == 0 {
            black += 1;
        }
    }
    let total = buffer.pixel_count();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}
