//! Synthetic test data with known detection characteristics
//!
//! Generators for luma frames and raster images used by the test suite
//! and benchmarks: uniform fields, checkerboards that trip the contrast
//! signals, and card-like compositions that look like a document on a
//! bright backdrop.

use image::{Rgba, RgbaImage};

use crate::types::FrameBuffer;

/// Luma frame filled with a single value
pub fn uniform_frame(value: u8, width: u32, height: u32) -> FrameBuffer {
    FrameBuffer::new(vec![value; (width as usize) * (height as usize)], width, height)
}

/// Luma frame alternating 0/255 between neighboring pixels.
///
/// Every interior pixel sees the maximum 4-neighbor gradient, saturating
/// the contrast and line signals.
pub fn checkerboard_frame(width: u32, height: u32) -> FrameBuffer {
    let mut data = vec![0u8; (width as usize) * (height as usize)];
    for y in 0..height as usize {
        for x in 0..width as usize {
            if (x + y) % 2 == 0 {
                data[y * width as usize + x] = 255;
            }
        }
    }
    FrameBuffer::new(data, width, height)
}

/// Luma frame resembling a document capture: bright backdrop, centered
/// mid-tone card, dark text rows inside the card.
pub fn card_frame(width: u32, height: u32) -> FrameBuffer {
    let mut data = vec![235u8; (width as usize) * (height as usize)];

    let card_width = (width as f32 * 0.8) as u32;
    let card_height = ((card_width as f32 / 1.6) as u32).min(height);
    let left = (width - card_width) / 2;
    let top = (height - card_height) / 2;

    for y in top..(top + card_height).min(height) {
        for x in left..(left + card_width).min(width) {
            let index = y as usize * width as usize + x as usize;
            // Text lines on a 9-row period (coprime to the sampling
            // strides, so sampled densities match the true fractions)
            data[index] = if (y - top) % 9 < 2 { 25 } else { 150 };
        }
    }

    FrameBuffer::new(data, width, height)
}

/// RGBA image filled with a single gray value
pub fn uniform_image(value: u8, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
}

/// RGBA image resembling a captured document: white backdrop, centered
/// light-gray card with dark text rows.
pub fn card_image(width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba([250, 250, 250, 255]));

    let card_width = (width as f32 * 0.8) as u32;
    let card_height = ((card_width as f32 / 1.6) as u32).min(height);
    let left = (width - card_width) / 2;
    let top = (height - card_height) / 2;

    for y in top..(top + card_height).min(height) {
        for x in left..(left + card_width).min(width) {
            let pixel = if (y - top) % 9 < 2 {
                Rgba([30, 30, 30, 255])
            } else {
                Rgba([180, 180, 180, 255])
            };
            image.put_pixel(x, y, pixel);
        }
    }

    image
}
