//! Document location and cropping
//!
//! Finds the crop area with the fixed-ratio locator and extracts it,
//! falling back to a smaller default centered crop (and finally to the
//! unmodified original) when the area is too small to be a document.

use image::{imageops, RgbaImage};

use crate::detector::locate::{document_bounds, PIPELINE_FRACTION};
use crate::types::Rectangle;

/// Located area below this size is replaced by the default crop
pub const MIN_LOCATE_WIDTH: u32 = 100;
pub const MIN_LOCATE_HEIGHT: u32 = 60;

/// Crop area below this size falls back to the default centered crop
pub const MIN_CROP_WIDTH: u32 = 50;
pub const MIN_CROP_HEIGHT: u32 = 30;

/// Width fraction of the default centered fallback crop
pub const DEFAULT_CROP_FRACTION: f32 = 0.80;

/// Locate the document area for cropping.
///
/// Uses the pipeline fraction of the width; when the result is smaller
/// than a plausible document the default centered crop is used instead.
pub fn locate_crop_area(width: u32, height: u32) -> Rectangle {
    let bounds = document_bounds(width, height, PIPELINE_FRACTION);
    if bounds.width() < MIN_LOCATE_WIDTH || bounds.height() < MIN_LOCATE_HEIGHT {
        log::debug!(
            "Located area {}x{} below minimum, using default crop",
            bounds.width(),
            bounds.height()
        );
        return document_bounds(width, height, DEFAULT_CROP_FRACTION);
    }
    bounds
}

/// Extract the document sub-image at `bounds`.
///
/// Undersized bounds fall back to the default centered crop; when even
/// that collapses (tiny images) the original is returned unchanged.
pub fn crop_document(image: &RgbaImage, bounds: Rectangle) -> RgbaImage {
    let (width, height) = image.dimensions();

    let area = if bounds.width() < MIN_CROP_WIDTH || bounds.height() < MIN_CROP_HEIGHT {
        document_bounds(width, height, DEFAULT_CROP_FRACTION)
    } else {
        bounds
    };

    if area.is_empty() {
        log::debug!("No usable crop area for {}x{}, passing original through", width, height);
        return image.clone();
    }

    imageops::crop_imm(image, area.left, area.top, area.width(), area.height()).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_locate_uses_pipeline_fraction() {
        let area = locate_crop_area(1200, 800);
        // 1200 * 0.9 = 1080 wide, 1080 / 1.6 = 675 tall
        assert_eq!(area.width(), 1080);
        assert_eq!(area.height(), 675);
    }

    #[test]
    fn test_locate_small_image_uses_default_crop() {
        // 0.9 * 100 = 90 < MIN_LOCATE_WIDTH
        let area = locate_crop_area(100, 400);
        assert_eq!(area.width(), (100.0 * DEFAULT_CROP_FRACTION) as u32);
    }

    #[test]
    fn test_crop_extracts_requested_area() {
        let mut image = RgbaImage::from_pixel(400, 300, Rgba([0, 0, 0, 255]));
        image.put_pixel(200, 150, Rgba([255, 0, 0, 255]));

        let bounds = locate_crop_area(400, 300);
        let cropped = crop_document(&image, bounds);
        assert_eq!(cropped.dimensions(), (bounds.width(), bounds.height()));

        // The marked center pixel survives the centered crop
        let cx = 200 - bounds.left;
        let cy = 150 - bounds.top;
        assert_eq!(cropped.get_pixel(cx, cy)[0], 255);
    }

    #[test]
    fn test_undersized_bounds_fall_back() {
        let image = RgbaImage::from_pixel(400, 300, Rgba([128, 128, 128, 255]));
        let tiny = Rectangle::clamped(10, 10, 40, 20, 400, 300);

        let cropped = crop_document(&image, tiny);
        let fallback = document_bounds(400, 300, DEFAULT_CROP_FRACTION);
        assert_eq!(cropped.dimensions(), (fallback.width(), fallback.height()));
    }

    #[test]
    fn test_tiny_image_passes_through() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([5, 6, 7, 255]));
        let bounds = locate_crop_area(1, 1);
        let cropped = crop_document(&image, bounds);
        assert_eq!(cropped.dimensions(), (1, 1));
        assert_eq!(cropped.get_pixel(0, 0), image.get_pixel(0, 0));
    }
}
