/// Capture Processing Pipeline
///
/// Turns a captured photo into the final document image in four
/// sequential stages:
/// 1. Locate the document area (fixed-ratio centered heuristic)
/// 2. Crop to it
/// 3. Remove the background (edge-sampled color distance)
/// 4. Enhance (composed saturation/contrast color matrix)
///
/// Every stage is total: invalid bounds or degenerate images degrade to a
/// smaller default crop or a pass-through of the original, never to a
/// panic. The input image is never mutated; each stage returns a new one.
/// Callers that receive an error keep the unprocessed original.
pub mod background;
pub mod crop;
pub mod enhance;

use image::RgbaImage;
use thiserror::Error;

pub use background::{remove_background, remove_background_with, BACKGROUND_TOLERANCE};
pub use crop::{crop_document, locate_crop_area, DEFAULT_CROP_FRACTION};
pub use enhance::{enhance, enhance_with, CONTRAST_SCALE, SATURATION_BOOST};

/// Pipeline-boundary error. Stage-internal failures degrade to fallbacks;
/// only an image with nothing to process surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("cannot process empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Run the full locate → crop → background removal → enhancement chain.
///
/// Returns a new image; the input is untouched. The only error is a
/// zero-area input, reported with a descriptive message.
pub fn process_document(image: &RgbaImage) -> Result<RgbaImage, PipelineError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptyImage { width, height });
    }

    log::info!("Processing {}x{} capture", width, height);

    let bounds = crop::locate_crop_area(width, height);
    log::debug!(
        "Document area: ({}, {})-({}, {})",
        bounds.left,
        bounds.top,
        bounds.right,
        bounds.bottom
    );

    let cropped = crop::crop_document(image, bounds);
    let cleared = background::remove_background(&cropped);
    let enhanced = enhance::enhance(&cleared);

    log::info!(
        "Processed capture: {}x{} -> {}x{}",
        width,
        height,
        enhanced.width(),
        enhanced.height()
    );
    Ok(enhanced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_empty_image_is_the_only_error() {
        let empty = RgbaImage::new(0, 0);
        let err = process_document(&empty).unwrap_err();
        assert!(err.to_string().contains("empty image"));
    }

    #[test]
    fn test_single_pixel_passes_through() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        let result = process_document(&image).unwrap();
        assert_eq!(result.dimensions(), (1, 1));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let image = RgbaImage::from_pixel(200, 120, Rgba([240, 240, 240, 255]));
        let snapshot = image.clone();
        let _ = process_document(&image).unwrap();
        assert_eq!(image, snapshot);
    }
}
