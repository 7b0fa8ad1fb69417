//! Background removal
//!
//! Estimates the background color by sampling the image edges, then makes
//! every pixel within a fixed color distance of that estimate fully
//! transparent. A crude classifier by design: the document interior is
//! expected to differ from the backdrop by more than the tolerance.

use image::{Rgba, RgbaImage};

/// Euclidean RGB distance at or below which a pixel counts as background
pub const BACKGROUND_TOLERANCE: f32 = 30.0;

/// Sampling stride along each image edge
pub const EDGE_SAMPLE_STRIDE: u32 = 10;

/// Remove the background with the default tolerance and stride
pub fn remove_background(image: &RgbaImage) -> RgbaImage {
    remove_background_with(image, BACKGROUND_TOLERANCE, EDGE_SAMPLE_STRIDE)
}

/// Remove the background with explicit tolerance and edge stride.
///
/// Pixels within `tolerance` of the edge-sampled mean color become fully
/// transparent; all others are kept unchanged. The pass is per-pixel with
/// no neighborhood dependencies.
pub fn remove_background_with(image: &RgbaImage, tolerance: f32, stride: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let (bg_r, bg_g, bg_b) = edge_mean_color(image, stride.max(1));
    log::debug!(
        "Background estimate: ({:.0}, {:.0}, {:.0})",
        bg_r,
        bg_g,
        bg_b
    );

    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let dr = pixel[0] as f32 - bg_r;
        let dg = pixel[1] as f32 - bg_g;
        let db = pixel[2] as f32 - bg_b;
        let distance = (dr * dr + dg * dg + db * db).sqrt();

        if distance <= tolerance {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
    result
}

/// Mean RGB of samples taken along all four image edges
fn edge_mean_color(image: &RgbaImage, stride: u32) -> (f32, f32, f32) {
    let (width, height) = image.dimensions();

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    let mut add = |pixel: &Rgba<u8>| {
        sum[0] += pixel[0] as u64;
        sum[1] += pixel[1] as u64;
        sum[2] += pixel[2] as u64;
        count += 1;
    };

    for x in (0..width).step_by(stride as usize) {
        add(image.get_pixel(x, 0));
        add(image.get_pixel(x, height - 1));
    }
    for y in (0..height).step_by(stride as usize) {
        add(image.get_pixel(0, y));
        add(image.get_pixel(width - 1, y));
    }

    (
        sum[0] as f32 / count as f32,
        sum[1] as f32 / count as f32,
        sum[2] as f32 / count as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image_goes_fully_transparent() {
        let image = RgbaImage::from_pixel(60, 40, Rgba([200, 200, 200, 255]));
        let result = remove_background(&image);
        assert!(result.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_distinct_center_block_survives() {
        // White border, dark centered block well beyond the tolerance
        let mut image = RgbaImage::from_pixel(100, 80, Rgba([255, 255, 255, 255]));
        for x in 30..70 {
            for y in 20..60 {
                image.put_pixel(x, y, Rgba([40, 40, 40, 255]));
            }
        }

        let result = remove_background(&image);
        assert_eq!(result.get_pixel(50, 40), &Rgba([40, 40, 40, 255]));
        assert_eq!(result.get_pixel(0, 0)[3], 0);
        assert_eq!(result.get_pixel(99, 79)[3], 0);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        // Border at 100, block exactly tolerance away on one channel
        let mut image = RgbaImage::from_pixel(50, 50, Rgba([100, 100, 100, 255]));
        for x in 20..30 {
            for y in 20..30 {
                image.put_pixel(x, y, Rgba([130, 100, 100, 255]));
            }
        }

        let result = remove_background(&image);
        // Distance exactly 30 still counts as background
        assert_eq!(result.get_pixel(25, 25)[3], 0);
    }

    #[test]
    fn test_single_pixel_image() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 255]));
        let result = remove_background(&image);
        // The lone pixel is its own background
        assert_eq!(result.get_pixel(0, 0)[3], 0);
    }
}
