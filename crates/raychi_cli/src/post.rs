//! Display post-processing: gamma, clamp and 8-bit quantization.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use raychi_renderer::{Color, ImageBuffer};

/// Display gamma applied to linear radiance.
pub const GAMMA: f32 = 2.2;

/// Encode one linear channel as a display byte.
///
/// Negative and NaN values map to 0; anything at or above 1 after gamma maps
/// to 255.
pub fn encode_channel(linear: f32) -> u8 {
    let encoded = linear.max(0.0).powf(1.0 / GAMMA).min(1.0);
    (encoded * 255.0).round() as u8
}

/// Encode a linear colour as an 8-bit RGB pixel.
pub fn encode_color(color: Color) -> Rgb<u8> {
    Rgb([
        encode_channel(color.x),
        encode_channel(color.y),
        encode_channel(color.z),
    ])
}

/// Convert a render result to an 8-bit image.
pub fn to_rgb8(image: &ImageBuffer) -> RgbImage {
    RgbImage::from_fn(image.width, image.height, |x, y| encode_color(image.get(x, y)))
}

/// Post-process and save `image`; the format follows the file extension.
pub fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    to_rgb8(image)
        .save(path)
        .with_context(|| format!("failed to save image to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_channel() {
        assert_eq!(encode_channel(0.0), 0);
        assert_eq!(encode_channel(1.0), 255);
        assert_eq!(encode_channel(7.5), 255);
        assert_eq!(encode_channel(-1.0), 0);
        assert_eq!(encode_channel(f32::NAN), 0);
        // 0.5^(1/2.2) ≈ 0.7297
        assert_eq!(encode_channel(0.5), 186);
    }

    #[test]
    fn test_to_rgb8_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.pixels[1] = Color::new(1.0, 0.0, 2.0);

        let rgb = to_rgb8(&image);
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([255, 0, 255]));
    }
}
