//! Document locator
//!
//! Estimates where the document sits inside an image: a centered
//! rectangle at a fixed card aspect ratio, clamped to the image bounds.
//! The document is assumed to fill most of the frame width; callers pick
//! the fraction for their purpose.

use crate::types::Rectangle;

/// Width fraction used for detection estimates
pub const DETECTOR_FRACTION: f32 = 0.85;

/// Width fraction used by the processing pipeline's crop area
pub const PIPELINE_FRACTION: f32 = 0.90;

/// ID-card width-to-height aspect ratio
pub const CARD_ASPECT: f32 = 1.6;

/// Centered candidate rectangle for a document occupying `fraction` of
/// the image width, with height derived from [`CARD_ASPECT`].
///
/// The result is always fully contained in `[0, width] x [0, height]`;
/// degenerate image dimensions yield an empty rectangle rather than an
/// error.
pub fn document_bounds(width: u32, height: u32, fraction: f32) -> Rectangle {
    let doc_width = (width as f32 * fraction) as i64;
    let doc_height = (doc_width as f32 / CARD_ASPECT) as i64;

    let left = (width as i64 - doc_width) / 2;
    let top = (height as i64 - doc_height) / 2;

    Rectangle::clamped(left, top, left + doc_width, top + doc_height, width, height)
}
