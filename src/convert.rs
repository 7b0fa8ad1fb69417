//! Raw frame conversion
//!
//! Expands a single-plane luma frame into a gray RGBA raster, applying
//! the sensor rotation hint. This sits outside the scored path: the frame
//! scorer reads the raw plane directly and ignores rotation entirely.

use image::{imageops, Rgba, RgbaImage};

use crate::errors::ScanError;
use crate::types::FrameBuffer;

/// Convert a luma-plane frame to a gray RGBA image, rotated per the
/// frame's rotation hint (multiples of 90 degrees; anything else is
/// ignored with a warning).
pub fn luma_to_rgba(frame: &FrameBuffer) -> Result<RgbaImage, ScanError> {
    if !frame.is_valid() {
        return Err(ScanError::ConversionError(format!(
            "buffer too small: {} bytes for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut image = RgbaImage::new(frame.width, frame.height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let value = frame.data[y as usize * frame.width as usize + x as usize];
        *pixel = Rgba([value, value, value, 255]);
    }

    Ok(match frame.rotation % 360 {
        0 => image,
        90 => imageops::rotate90(&image),
        180 => imageops::rotate180(&image),
        270 => imageops::rotate270(&image),
        other => {
            log::warn!("unsupported rotation hint {} degrees, ignoring", other);
            image
        }
    })
}
