//! Testing utilities for docscan
//!
//! Provides synthetic frames and raster images with known detection
//! characteristics, enabling reliable offline testing without a camera.

pub mod synthetic_data;

pub use synthetic_data::{
    card_frame, card_image, checkerboard_frame, uniform_frame, uniform_image,
};
