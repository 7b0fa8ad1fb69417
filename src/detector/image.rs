//! Decoded-image scorer
//!
//! Heavier detection variant for fully decoded raster images, combining
//! geometric signals (card aspect ratio, edge strength, dark corners)
//! with textural ones (document mid-tones, text-like dark pixels). Used
//! where a decoded bitmap is available: captured stills, diagnostics,
//! stricter validation.
//!
//! The keyword and id-number signals of the scoring table depend on a
//! text-recognition collaborator that is deliberately absent; their
//! weights are kept so the confidence scale stays comparable, but the
//! signals are always false here.

use image::RgbaImage;

use crate::detector::locate::{document_bounds, DETECTOR_FRACTION};
use crate::pixel::{image_gradients, in_band, luma_at};
use crate::types::DetectionResult;

// Confidence weights; the table sums to 1.0
pub const TEXT_WEIGHT: f32 = 0.30;
pub const NUMBER_WEIGHT: f32 = 0.30;
pub const RECTANGULAR_WEIGHT: f32 = 0.20;
pub const DOCUMENT_WEIGHT: f32 = 0.15;
pub const TEXT_DENSITY_WEIGHT: f32 = 0.05;

/// Tunable sampling parameters for the image scorer
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImageScorerConfig {
    /// Stride for the edge-strength scan
    pub edge_stride: usize,
    /// Stride for the document-feature scan
    pub document_stride: usize,
    /// Stride for the text-density scan
    pub text_stride: usize,
    /// Card aspect-ratio acceptance range (width / height)
    pub aspect_range: (f32, f32),
    /// Single-axis gradient above this marks an edge pixel
    pub edge_gradient_threshold: u16,
    /// Minimum edge density for the rectangular-shape heuristic
    pub min_edge_strength: f32,
    /// Side length of the corner inspection blocks
    pub corner_size: u32,
    /// Luma below this counts as a dark corner pixel
    pub corner_dark_luma: u8,
    /// Minimum dark fraction for a corner to qualify
    pub min_corner_dark_fraction: f32,
    /// Qualifying corners required out of four
    pub min_dark_corners: u32,
    /// Inclusive mid-tone band for document-like pixels
    pub document_band: (u8, u8),
    /// Minimum document-band density
    pub min_document_density: f32,
    /// Luma below this counts as a text-like pixel
    pub text_luma: u8,
    /// Minimum text-like density
    pub min_text_density: f32,
}

impl Default for ImageScorerConfig {
    fn default() -> Self {
        Self {
            edge_stride: 3,
            document_stride: 5,
            text_stride: 4,
            aspect_range: (1.4, 1.8),
            edge_gradient_threshold: 50,
            min_edge_strength: 0.25,
            corner_size: 20,
            corner_dark_luma: 128,
            min_corner_dark_fraction: 0.3,
            min_dark_corners: 2,
            document_band: (50, 200),
            min_document_density: 0.4,
            text_luma: 100,
            min_text_density: 0.15,
        }
    }
}

/// Analyze a decoded image with the default parameters
pub fn analyze_image(image: &RgbaImage) -> DetectionResult {
    analyze_image_with(image, &ImageScorerConfig::default())
}

/// Analyze a decoded image with explicit parameters
pub fn analyze_image_with(image: &RgbaImage, config: &ImageScorerConfig) -> DetectionResult {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return DetectionResult::not_detected(0.0).with_error_message("empty image");
    }

    let is_rectangular = rectangular_shape(image, config);
    let has_document_features = document_features(image, config);
    let has_text_density = text_density(image, config);

    // Recognized-text signals: collaborator absent, always false
    let has_text = false;
    let has_number = false;

    let detected =
        has_text || has_number || is_rectangular || has_document_features || has_text_density;

    let mut confidence = 0.0;
    if has_text {
        confidence += TEXT_WEIGHT;
    }
    if has_number {
        confidence += NUMBER_WEIGHT;
    }
    if is_rectangular {
        confidence += RECTANGULAR_WEIGHT;
    }
    if has_document_features {
        confidence += DOCUMENT_WEIGHT;
    }
    if has_text_density {
        confidence += TEXT_DENSITY_WEIGHT;
    }

    log::debug!(
        "image scan {}x{}: rectangular={} document={} text_density={} conf={:.2}",
        width,
        height,
        is_rectangular,
        has_document_features,
        has_text_density,
        confidence
    );

    if detected {
        let bounds = document_bounds(width, height, DETECTOR_FRACTION);
        DetectionResult::detected(bounds, confidence)
    } else {
        DetectionResult::not_detected(confidence)
    }
}

/// Card-shaped image with strong edges and dark corners
fn rectangular_shape(image: &RgbaImage, config: &ImageScorerConfig) -> bool {
    let (width, height) = image.dimensions();

    let aspect = width as f32 / height as f32;
    let aspect_ok = aspect >= config.aspect_range.0 && aspect <= config.aspect_range.1;
    if !aspect_ok {
        return false;
    }

    edge_strength(image, config) > config.min_edge_strength && dark_corners(image, config)
}

/// Fraction of sampled pixels with a strong 4-neighbor gradient
fn edge_strength(image: &RgbaImage, config: &ImageScorerConfig) -> f32 {
    let (width, height) = image.dimensions();
    let stride = config.edge_stride.max(1);

    let mut total = 0u32;
    let mut edges = 0u32;

    for x in (0..width).step_by(stride) {
        for y in (0..height).step_by(stride) {
            total += 1;
            if x > 0 && y > 0 && x < width - 1 && y < height - 1 {
                let (h, v) = image_gradients(image, x, y);
                if h > config.edge_gradient_threshold || v > config.edge_gradient_threshold {
                    edges += 1;
                }
            }
        }
    }

    if total > 0 {
        edges as f32 / total as f32
    } else {
        0.0
    }
}

/// At least `min_dark_corners` of the four corner blocks are mostly dark
fn dark_corners(image: &RgbaImage, config: &ImageScorerConfig) -> bool {
    let (width, height) = image.dimensions();
    let size = config.corner_size;

    let corners = [
        (0, 0),
        (width.saturating_sub(size), 0),
        (0, height.saturating_sub(size)),
        (width.saturating_sub(size), height.saturating_sub(size)),
    ];

    let mut qualifying = 0u32;
    for (left, top) in corners {
        let mut total = 0u32;
        let mut dark = 0u32;
        for x in left..(left + size).min(width) {
            for y in top..(top + size).min(height) {
                total += 1;
                if luma_at(image, x, y) < config.corner_dark_luma {
                    dark += 1;
                }
            }
        }
        if total > 0 && dark as f32 / total as f32 > config.min_corner_dark_fraction {
            qualifying += 1;
        }
    }

    qualifying >= config.min_dark_corners
}

/// Mid-tone density typical of printed documents
fn document_features(image: &RgbaImage, config: &ImageScorerConfig) -> bool {
    let (width, height) = image.dimensions();
    let stride = config.document_stride.max(1);

    let mut total = 0u32;
    let mut structured = 0u32;

    for x in (0..width).step_by(stride) {
        for y in (0..height).step_by(stride) {
            total += 1;
            if in_band(
                luma_at(image, x, y),
                config.document_band.0,
                config.document_band.1,
            ) {
                structured += 1;
            }
        }
    }

    total > 0 && structured as f32 / total as f32 > config.min_document_density
}

/// Dark-pixel density suggesting printed text
fn text_density(image: &RgbaImage, config: &ImageScorerConfig) -> bool {
    let (width, height) = image.dimensions();
    let stride = config.text_stride.max(1);

    let mut total = 0u32;
    let mut dark = 0u32;

    for x in (0..width).step_by(stride) {
        for y in (0..height).step_by(stride) {
            total += 1;
            if luma_at(image, x, y) < config.text_luma {
                dark += 1;
            }
        }
    }

    total > 0 && dark as f32 / total as f32 > config.min_text_density
}
