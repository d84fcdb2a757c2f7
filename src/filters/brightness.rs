use crate::filters::grayscale::luma;
use crate::models::PixelBuffer;

/// Mean luma over the whole buffer, or 0.0 for an empty buffer.
pub fn mean_luma(buffer: &PixelBuffer) -> f64 {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for px in buffer.data().chunks_exact(4) {
        sum += luma(px[0], px[1], px[2]) as u64;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Channel-wise inversion (255 - R, G, B), alpha unchanged.
/// Returns a new buffer of the same dimensions.
pub fn invert(src: &PixelBuffer) -> PixelBuffer {
    let mut out = src.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_luma_uniform() {
        let buffer = PixelBuffer::filled(5, 4, [40, 40, 40, 255]);
        assert!((mean_luma(&buffer) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_luma_empty() {
        let buffer = PixelBuffer::new(0, 0);
        assert_eq!(mean_luma(&buffer), 0.0);
    }

    #[test]
    fn test_mean_luma_two_tone() {
        let mut buffer = PixelBuffer::filled(2, 1, [0, 0, 0, 255]);
        buffer.put(1, 0, [200, 200, 200, 255]);
        assert!((mean_luma(&buffer) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_invert() {
        let src = PixelBuffer::filled(2, 2, [10, 100, 250, 77]);
        let inverted = invert(&src);
        assert_eq!(inverted.get(1, 1), [245, 155, 5, 77]);
        // Inverting twice restores the original
        assert_eq!(invert(&inverted), src);
    }
}
