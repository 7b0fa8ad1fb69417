//! DocScan: Heuristic document detection for camera-based ID scanning
//!
//! This crate decides, per camera frame, whether a rectangular identity
//! document is present and approximately where, and post-processes the
//! captured photo into a cropped, background-stripped, enhanced image.
//!
//! # Features
//! - Fast luma-plane frame scoring for live auto-capture (lenient variant
//!   with a strict fallback)
//! - Richer multi-signal scoring for decoded still images
//! - Fixed-aspect document locator with boundary clamping
//! - Crop / background-removal / enhancement pipeline for captures
//! - Stateless, synchronous, deterministic detection calls
//!
//! # Usage
//! ```rust
//! use docscan::{analyze_frame, FrameBuffer};
//!
//! let frame = FrameBuffer::new(vec![128u8; 640 * 480], 640, 480);
//! let result = analyze_frame(&frame);
//! if result.is_detected {
//!     println!("document at {:?} ({:.0}%)", result.bounds, result.confidence * 100.0);
//! }
//! ```
//!
//! Camera session lifecycle, permissions, UI overlays, and persistence
//! are external collaborators; this crate only consumes buffers they
//! supply and returns values they act on.
pub mod config;
pub mod convert;
pub mod detector;
pub mod errors;
pub mod pipeline;
pub mod pixel;
pub mod types;

// Testing utilities - synthetic data for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::DocscanConfig;
pub use detector::{analyze_frame, analyze_image, document_bounds, score_frame};
pub use errors::ScanError;
pub use pipeline::{process_document, PipelineError};
pub use types::{DetectionResult, FrameBuffer, Rectangle};

/// Initialize logging for the scanner core
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "docscan=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}
