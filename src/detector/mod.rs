/// Document Detection Module
///
/// Two-stage heuristic detection of rectangular identity documents:
/// 1. Fast luma-plane scorer for live camera frames (lenient variant
///    first, strict variant as fallback)
/// 2. Richer multi-signal scorer for decoded still images
/// 3. Fixed-aspect-ratio locator producing the candidate rectangle used
///    for both detection sampling and cropping
///
/// All entry points are pure synchronous functions over one buffer; no
/// state is retained between calls.
pub mod frame;
pub mod image;
pub mod locate;

pub use self::frame::{
    analyze_frame, analyze_frame_with, score_frame, FrameAnalysisConfig, FrameScorerConfig,
    SignalSet, SignalWeights,
};
pub use self::image::{analyze_image, analyze_image_with, ImageScorerConfig};
pub use self::locate::{document_bounds, CARD_ASPECT, DETECTOR_FRACTION, PIPELINE_FRACTION};
