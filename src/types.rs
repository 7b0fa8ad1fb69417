//! Core data types for document detection and processing
//!
//! Frames, rectangles, and detection results shared by the scorers and the
//! processing pipeline. All types are value objects: created per call,
//! never mutated after construction, safe to send across threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw single-plane luma frame delivered by the camera driver.
///
/// `data` holds one byte per pixel in row-major order and must be at least
/// `width * height` long to be analyzable. The rotation hint is carried
/// through for raster conversion but ignored by the scorers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameBuffer {
    /// Unique frame identifier
    pub id: String,
    /// Luma plane, one byte per pixel, row-major
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Sensor rotation hint in degrees (0, 90, 180, 270)
    pub rotation: u32,
    /// Capture timestamp (diagnostics only, never affects scoring)
    pub timestamp: DateTime<Utc>,
    /// Buffer size in bytes
    pub size_bytes: usize,
}

impl FrameBuffer {
    /// Create a new frame buffer from a luma plane
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        let size_bytes = data.len();
        Self {
            id: Uuid::new_v4().to_string(),
            data,
            width,
            height,
            rotation: 0,
            timestamp: Utc::now(),
            size_bytes,
        }
    }

    /// Set the sensor rotation hint
    pub fn with_rotation(mut self, rotation: u32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Check if the buffer covers the declared dimensions
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() >= (self.width as usize) * (self.height as usize)
    }

    /// Luma value at (x, y), or None when outside the buffer
    pub fn luma_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Axis-aligned rectangle in image coordinates.
///
/// Invariant: `left <= right` and `top <= bottom`, with all edges inside
/// the parent image once produced by [`clamped`](Rectangle::clamped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rectangle {
    /// Create a rectangle from possibly out-of-range edges, clamping into
    /// `[0, width] x [0, height]` and forcing edge ordering.
    pub fn clamped(left: i64, top: i64, right: i64, bottom: i64, width: u32, height: u32) -> Self {
        let clamp_x = |v: i64| v.clamp(0, width as i64) as u32;
        let clamp_y = |v: i64| v.clamp(0, height as i64) as u32;
        let l = clamp_x(left);
        let t = clamp_y(top);
        let r = clamp_x(right).max(l);
        let b = clamp_y(bottom).max(t);
        Self {
            left: l,
            top: t,
            right: r,
            bottom: b,
        }
    }

    /// Rectangle width in pixels
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Rectangle height in pixels
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// True when the rectangle encloses no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Outcome of a single detection call.
///
/// `confidence` is always populated and clamped to `[0, 1]` so the
/// auto-capture policy has a usable signal even on degraded paths.
/// `bounds` is present only when `is_detected` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub is_detected: bool,
    pub bounds: Option<Rectangle>,
    pub confidence: f32,
    pub error_message: Option<String>,
}

impl DetectionResult {
    /// Positive detection with an estimated document rectangle
    pub fn detected(bounds: Rectangle, confidence: f32) -> Self {
        Self {
            is_detected: true,
            bounds: Some(bounds),
            confidence: confidence.clamp(0.0, 1.0),
            error_message: None,
        }
    }

    /// Negative detection, keeping the computed confidence for callers
    /// that track trends across frames
    pub fn not_detected(confidence: f32) -> Self {
        Self {
            is_detected: false,
            bounds: None,
            confidence: confidence.clamp(0.0, 1.0),
            error_message: None,
        }
    }

    /// Attach diagnostic context to a degraded result
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}
