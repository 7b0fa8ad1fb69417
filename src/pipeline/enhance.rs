//! Image enhancement
//!
//! Boosts saturation and contrast with a single composed color matrix
//! applied per pixel: a saturation matrix (Rec.709 luminance weights)
//! multiplied by a uniform RGB scale. Alpha is never touched, so the
//! transparency produced by background removal survives.

use image::RgbaImage;

/// Saturation factor of the composed matrix
pub const SATURATION_BOOST: f32 = 1.2;

/// Uniform RGB scale of the composed matrix
pub const CONTRAST_SCALE: f32 = 1.2;

// Rec.709 luminance weights used by the saturation matrix
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

/// Enhance with the default saturation and contrast factors
pub fn enhance(image: &RgbaImage) -> RgbaImage {
    enhance_with(image, SATURATION_BOOST, CONTRAST_SCALE)
}

/// Enhance with explicit factors.
///
/// The two transforms compose into one 3x3 matrix so the image is walked
/// exactly once. Channels clamp to `[0, 255]`; alpha is unscaled.
pub fn enhance_with(image: &RgbaImage, saturation: f32, scale: f32) -> RgbaImage {
    let m = color_matrix(saturation, scale);

    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        pixel[0] = (m[0][0] * r + m[0][1] * g + m[0][2] * b).clamp(0.0, 255.0) as u8;
        pixel[1] = (m[1][0] * r + m[1][1] * g + m[1][2] * b).clamp(0.0, 255.0) as u8;
        pixel[2] = (m[2][0] * r + m[2][1] * g + m[2][2] * b).clamp(0.0, 255.0) as u8;
    }
    result
}

/// Saturation matrix composed with a uniform channel scale
fn color_matrix(saturation: f32, scale: f32) -> [[f32; 3]; 3] {
    let inv = 1.0 - saturation;
    [
        [
            (LUMA_R * inv + saturation) * scale,
            LUMA_G * inv * scale,
            LUMA_B * inv * scale,
        ],
        [
            LUMA_R * inv * scale,
            (LUMA_G * inv + saturation) * scale,
            LUMA_B * inv * scale,
        ],
        [
            LUMA_R * inv * scale,
            LUMA_G * inv * scale,
            (LUMA_B * inv + saturation) * scale,
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_identity_matrix_at_neutral_factors() {
        let m = color_matrix(1.0, 1.0);
        for (i, row) in m.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-6, "m[{}][{}] = {}", i, j, v);
            }
        }
    }

    #[test]
    fn test_gray_pixels_scale_uniformly() {
        // Saturation has no effect on gray; only the contrast scale acts
        let image = RgbaImage::from_pixel(10, 10, Rgba([100, 100, 100, 200]));
        let result = enhance(&image);
        let pixel = result.get_pixel(5, 5);
        for channel in 0..3 {
            assert!(
                (pixel[channel] as i32 - 120).abs() <= 1,
                "channel {} scaled to {}",
                channel,
                pixel[channel]
            );
        }
        // Alpha untouched
        assert_eq!(pixel[3], 200);
    }

    #[test]
    fn test_channels_clamp_at_white() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let result = enhance(&image);
        assert_eq!(result.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_saturation_spreads_channels() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 255]));
        let result = enhance(&image);
        let pixel = result.get_pixel(0, 0);

        // The dominant channel moves further from the luminance mean than
        // a pure scale would take it
        assert!(pixel[0] as f32 > 200.0 * CONTRAST_SCALE);
        assert!(pixel[2] < 60);
    }
}
