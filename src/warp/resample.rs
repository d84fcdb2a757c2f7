use crate::models::{PixelBuffer, Sample};

/// Bilinearly sample a buffer at fractional coordinates.
///
/// Coordinates are clamped to `[0, width-1] x [0, height-1]` first, so
/// out-of-range requests degrade to edge-pixel extrapolation instead of
/// indexing out of bounds. Never fails.
pub fn bilinear_sample(buffer: &PixelBuffer, x: f32, y: f32) -> Sample {
    let width = buffer.width();
    let height = buffer.height();
    if width == 0 || height == 0 {
        return Sample::default();
    }
    let data = buffer.data();

    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);

    let x0 = x as usize;
    let y0 = y as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let dx = x - x0 as f32;
    let dy = y - y0 as f32;

    let w00 = (1.0 - dx) * (1.0 - dy);
    let w10 = dx * (1.0 - dy);
    let w01 = (1.0 - dx) * dy;
    let w11 = dx * dy;

    let idx00 = (y0 * width + x0) * 4;
    let idx10 = (y0 * width + x1) * 4;
    let idx01 = (y1 * width + x0) * 4;
    let idx11 = (y1 * width + x1) * 4;

    let channel = |c: usize| {
        w00 * data[idx00 + c] as f32
            + w10 * data[idx10 + c] as f32
            + w01 * data[idx01 + c] as f32
            + w11 * data[idx11 + c] as f32
    };

    Sample::new(channel(0), channel(1), channel(2), channel(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_buffer(width: usize, height: usize) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buffer.put(x, y, [(x * 10) as u8, (y * 10) as u8, 128, 255]);
            }
        }
        buffer
    }

    #[test]
    fn test_integer_coordinates_are_exact() {
        let buffer = gradient_buffer(6, 5);
        for y in 0..5 {
            for x in 0..6 {
                let sample = bilinear_sample(&buffer, x as f32, y as f32);
                assert_eq!(sample.to_rgba(), buffer.get(x, y));
            }
        }
    }

    #[test]
    fn test_midpoint_interpolates() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.put(0, 0, [0, 0, 0, 255]);
        buffer.put(1, 0, [100, 200, 50, 255]);

        let sample = bilinear_sample(&buffer, 0.5, 0.0);
        assert_eq!(sample.to_rgba(), [50, 100, 25, 255]);
    }

    #[test]
    fn test_far_out_of_range_clamps_to_edges() {
        let buffer = gradient_buffer(4, 4);
        let top_left = bilinear_sample(&buffer, -1000.0, -1000.0);
        assert_eq!(top_left.to_rgba(), buffer.get(0, 0));

        let bottom_right = bilinear_sample(&buffer, 1e6, 1e6);
        assert_eq!(bottom_right.to_rgba(), buffer.get(3, 3));

        let mixed = bilinear_sample(&buffer, -5.0, 2.0);
        assert_eq!(mixed.to_rgba(), buffer.get(0, 2));
    }

    #[test]
    fn test_single_pixel_buffer() {
        let buffer = PixelBuffer::filled(1, 1, [9, 8, 7, 255]);
        let sample = bilinear_sample(&buffer, 0.75, -3.0);
        assert_eq!(sample.to_rgba(), [9, 8, 7, 255]);
    }
}
