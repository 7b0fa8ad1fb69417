//! Luma-plane frame scorer
//!
//! Scores raw single-plane camera frames for document presence. The scan
//! samples a centered fixed-aspect candidate region on a coarse stride and
//! accumulates eight pixel counts against fixed thresholds; the densities
//! are reduced to a weighted confidence and a detection decision.
//!
//! Two variants share the algorithm with different constants: the lenient
//! variant runs first on every frame, the strict variant is the fallback
//! when the lenient one finds nothing. Both are plain data configurations
//! so the stride/threshold tradeoff stays tunable.

use std::time::{Duration, Instant};

use crate::detector::locate::{document_bounds, DETECTOR_FRACTION};
use crate::pixel::{horizontal_gradient, in_band, vertical_gradient};
use crate::types::{DetectionResult, FrameBuffer};

/// Wall-clock budget for one frame analysis. Exceeding it yields a
/// low-confidence negative result instead of blocking the frame queue.
pub const FRAME_BUDGET_MS: u64 = 100;

/// When both variants fail to sample anything, report the document as
/// present rather than stalling auto-capture. Deliberate upstream bias;
/// see DESIGN.md before changing.
pub const ASSUME_PRESENT_ON_FAILURE: bool = true;

/// Confidence reported by the assume-present fallback
pub const ASSUME_PRESENT_CONFIDENCE: f32 = 0.8;

// Detection branch thresholds shared by both variants
pub const MIN_EDGE_DENSITY: f32 = 0.05;
pub const MIN_TEXT_DENSITY: f32 = 0.03;
pub const MIN_CONTRAST_DENSITY: f32 = 0.02;
pub const MIN_LINE_DENSITY: f32 = 0.01;
pub const MIN_DOCUMENT_DENSITY: f32 = 0.1;
pub const MIN_STRUCTURED_DENSITY: f32 = 0.05;
pub const MIN_BORDER_DENSITY: f32 = 0.01;
pub const HIGH_CONFIDENCE: f32 = 0.15;

/// Convex weights applied to the signal densities
#[derive(Debug, Clone, Copy)]
pub struct SignalWeights {
    pub edge: f32,
    pub text: f32,
    pub contrast: f32,
    pub horizontal_line: f32,
    pub vertical_line: f32,
    pub document: f32,
    pub structured: f32,
    pub border: f32,
}

impl SignalWeights {
    /// Sum of all weights; must stay <= 1.0 for the confidence clamp to
    /// be a formality rather than a correction
    pub fn total(&self) -> f32 {
        self.edge
            + self.text
            + self.contrast
            + self.horizontal_line
            + self.vertical_line
            + self.document
            + self.structured
            + self.border
    }
}

/// Per-scan signal densities, each in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalSet {
    /// Fraction of samples brighter than the edge threshold
    pub edge: f32,
    /// Fraction of samples darker than the text threshold
    pub text: f32,
    /// Fraction of interior samples whose combined gradient exceeds the
    /// contrast threshold
    pub contrast: f32,
    /// Fraction of interior samples with a strong horizontal gradient
    pub horizontal_line: f32,
    /// Fraction of interior samples with a strong vertical gradient
    pub vertical_line: f32,
    /// Fraction of samples inside the document mid-tone band
    pub document: f32,
    /// Fraction of samples inside the structured-content band
    pub structured: f32,
    /// Fraction of bright samples within the border ring
    pub border: f32,
}

/// Parameterization of one scorer variant.
///
/// The two production variants are [`FrameScorerConfig::lenient`] and
/// [`FrameScorerConfig::strict`]; they must stay separate configurations
/// because callers deliberately try lenient first and fall back to strict.
#[derive(Debug, Clone)]
pub struct FrameScorerConfig {
    /// Variant name used in logs and diagnostics
    pub name: &'static str,
    /// Fraction of the frame width covered by the candidate region
    pub region_fraction: f32,
    /// Sampling stride in pixels
    pub stride: usize,
    /// Luma above this counts as a bright edge pixel
    pub edge_threshold: u8,
    /// Luma below this counts as a dark text-like pixel
    pub text_threshold: u8,
    /// Single-axis gradient above this counts as a line pixel
    pub line_threshold: u16,
    /// Combined gradient above this counts as a high-contrast pixel
    pub contrast_threshold: u16,
    /// Inclusive mid-tone band for document-like pixels
    pub document_band: (u8, u8),
    /// Inclusive band for structured content; lenient variant only
    pub structured_band: Option<(u8, u8)>,
    /// Border-ring width in pixels; lenient variant only
    pub border_margin: Option<u32>,
    /// Luma above this counts as a bright border pixel
    pub border_threshold: u8,
    /// Confidence weights; total must not exceed 1.0
    pub weights: SignalWeights,
    /// Detection fires unconditionally above this confidence
    pub confidence_cutoff: f32,
}

impl FrameScorerConfig {
    /// Lenient variant: coarse stride, permissive thresholds, all eight
    /// signals. Tried first on every frame.
    pub fn lenient() -> Self {
        Self {
            name: "lenient",
            region_fraction: 0.90,
            stride: 8,
            edge_threshold: 50,
            text_threshold: 60,
            line_threshold: 60,
            contrast_threshold: 80,
            document_band: (30, 180),
            structured_band: Some((20, 140)),
            border_margin: Some(15),
            border_threshold: 80,
            weights: SignalWeights {
                edge: 0.15,
                text: 0.25,
                contrast: 0.20,
                horizontal_line: 0.10,
                vertical_line: 0.10,
                document: 0.10,
                structured: 0.05,
                border: 0.05,
            },
            confidence_cutoff: 0.30,
        }
    }

    /// Strict variant: fine stride, tighter thresholds, six signals.
    /// Fallback when the lenient variant finds nothing.
    pub fn strict() -> Self {
        Self {
            name: "strict",
            region_fraction: 0.80,
            stride: 4,
            edge_threshold: 70,
            text_threshold: 30,
            line_threshold: 100,
            contrast_threshold: 120,
            document_band: (50, 150),
            structured_band: None,
            border_margin: None,
            border_threshold: 80,
            weights: SignalWeights {
                edge: 0.25,
                text: 0.25,
                contrast: 0.20,
                horizontal_line: 0.15,
                vertical_line: 0.10,
                document: 0.05,
                structured: 0.0,
                border: 0.0,
            },
            confidence_cutoff: 0.25,
        }
    }

    /// Override the sampling stride, keeping everything else
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(1);
        self
    }
}

/// Configuration of the full lenient-then-strict analysis chain
#[derive(Debug, Clone)]
pub struct FrameAnalysisConfig {
    pub lenient: FrameScorerConfig,
    pub strict: FrameScorerConfig,
    /// Wall-clock budget for the whole chain, milliseconds
    pub budget_ms: u64,
    /// Report `(true, 0.8)` when both variants fail entirely
    pub assume_present_on_failure: bool,
}

impl Default for FrameAnalysisConfig {
    fn default() -> Self {
        Self {
            lenient: FrameScorerConfig::lenient(),
            strict: FrameScorerConfig::strict(),
            budget_ms: FRAME_BUDGET_MS,
            assume_present_on_failure: ASSUME_PRESENT_ON_FAILURE,
        }
    }
}

/// Why a scan produced no usable signals
enum ScanFailure {
    /// Wall-clock budget exhausted mid-scan
    Timeout,
    /// No sample fell inside both the candidate region and the buffer
    NoSamples,
}

/// Analyze one live frame with the default lenient-then-strict chain.
///
/// Never fails: degraded paths are encoded in the result and its
/// `error_message`. Identical buffer bytes and dimensions always produce
/// an identical result.
pub fn analyze_frame(frame: &FrameBuffer) -> DetectionResult {
    analyze_frame_with(frame, &FrameAnalysisConfig::default())
}

/// Analyze one live frame with an explicit chain configuration
pub fn analyze_frame_with(frame: &FrameBuffer, config: &FrameAnalysisConfig) -> DetectionResult {
    if frame.width == 0 || frame.height == 0 {
        return DetectionResult::not_detected(0.0).with_error_message("empty frame");
    }

    let deadline = Instant::now() + Duration::from_millis(config.budget_ms);

    match scan_variant(frame, &config.lenient, deadline) {
        Ok(result) if result.is_detected => result,
        Ok(lenient_result) => match scan_variant(frame, &config.strict, deadline) {
            Ok(result) if result.is_detected => result,
            // Strict agreed or could not improve; the lenient verdict
            // (with its confidence) stands
            Ok(_) | Err(ScanFailure::NoSamples) => lenient_result,
            Err(ScanFailure::Timeout) => timeout_result(config.budget_ms),
        },
        Err(ScanFailure::Timeout) => timeout_result(config.budget_ms),
        Err(ScanFailure::NoSamples) => match scan_variant(frame, &config.strict, deadline) {
            Ok(result) => result,
            Err(ScanFailure::Timeout) => timeout_result(config.budget_ms),
            Err(ScanFailure::NoSamples) => total_failure_result(frame, config),
        },
    }
}

/// Score one frame with a single variant, no fallback chain
pub fn score_frame(frame: &FrameBuffer, config: &FrameScorerConfig) -> DetectionResult {
    if frame.width == 0 || frame.height == 0 {
        return DetectionResult::not_detected(0.0).with_error_message("empty frame");
    }
    let deadline = Instant::now() + Duration::from_millis(FRAME_BUDGET_MS);
    match scan_variant(frame, config, deadline) {
        Ok(result) => result,
        Err(ScanFailure::Timeout) => timeout_result(FRAME_BUDGET_MS),
        Err(ScanFailure::NoSamples) => {
            DetectionResult::not_detected(0.0).with_error_message("no samples within buffer")
        }
    }
}

/// Compute the signal densities for one variant without the detection
/// decision. Exposed for diagnostics and benchmarks.
pub fn scan_signals(frame: &FrameBuffer, config: &FrameScorerConfig) -> Option<SignalSet> {
    let deadline = Instant::now() + Duration::from_millis(FRAME_BUDGET_MS);
    sample_region(frame, config, deadline).ok()
}

fn scan_variant(
    frame: &FrameBuffer,
    config: &FrameScorerConfig,
    deadline: Instant,
) -> Result<DetectionResult, ScanFailure> {
    let signals = sample_region(frame, config, deadline)?;
    let (detected, confidence) = evaluate(&signals, config);

    log::debug!(
        "{} scan: edge={:.3} text={:.3} contrast={:.3} conf={:.3} detected={}",
        config.name,
        signals.edge,
        signals.text,
        signals.contrast,
        confidence,
        detected
    );

    if detected {
        let bounds = document_bounds(frame.width, frame.height, DETECTOR_FRACTION);
        Ok(DetectionResult::detected(bounds, confidence))
    } else {
        Ok(DetectionResult::not_detected(confidence))
    }
}

/// Sample the candidate region on the configured stride and reduce the
/// counts to densities. Out-of-bounds samples are skipped, never read.
fn sample_region(
    frame: &FrameBuffer,
    config: &FrameScorerConfig,
    deadline: Instant,
) -> Result<SignalSet, ScanFailure> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let data = &frame.data;
    let region = document_bounds(frame.width, frame.height, config.region_fraction);
    let stride = config.stride.max(1) as u32;

    let mut samples = 0u32;
    let mut edge = 0u32;
    let mut text = 0u32;
    let mut contrast = 0u32;
    let mut h_line = 0u32;
    let mut v_line = 0u32;
    let mut document = 0u32;
    let mut structured = 0u32;
    let mut border = 0u32;

    let ring = config.border_margin.map(|margin| {
        (
            region.left.saturating_add(margin),
            region.right.saturating_sub(margin),
            region.top.saturating_add(margin),
            region.bottom.saturating_sub(margin),
        )
    });

    let mut y = region.top;
    while y <= region.bottom {
        if Instant::now() >= deadline {
            return Err(ScanFailure::Timeout);
        }

        let mut x = region.left;
        while x <= region.right {
            if (x as usize) < width && (y as usize) < height {
                let index = y as usize * width + x as usize;
                if let Some(&value) = data.get(index) {
                    samples += 1;

                    if value > config.edge_threshold {
                        edge += 1;
                    }
                    if value < config.text_threshold {
                        text += 1;
                    }

                    // Gradients are defined for interior pixels only; a
                    // neighbor past the end of a short buffer skips the
                    // gradient signals for that sample
                    if x > 0 && y > 0 && (x as usize) < width - 1 && (y as usize) < height - 1 {
                        if let (Some(&left), Some(&right), Some(&top), Some(&bottom)) = (
                            data.get(index - 1),
                            data.get(index + 1),
                            data.get(index - width),
                            data.get(index + width),
                        ) {
                            let h = horizontal_gradient(value, left, right);
                            let v = vertical_gradient(value, top, bottom);

                            if h > config.line_threshold {
                                h_line += 1;
                            }
                            if v > config.line_threshold {
                                v_line += 1;
                            }
                            if h + v > config.contrast_threshold {
                                contrast += 1;
                            }
                        }
                    }

                    if in_band(value, config.document_band.0, config.document_band.1) {
                        document += 1;
                    }
                    if let Some((low, high)) = config.structured_band {
                        if in_band(value, low, high) {
                            structured += 1;
                        }
                    }
                    if let Some((inner_left, inner_right, inner_top, inner_bottom)) = ring {
                        let in_ring =
                            x <= inner_left || x >= inner_right || y <= inner_top || y >= inner_bottom;
                        if in_ring && value > config.border_threshold {
                            border += 1;
                        }
                    }
                }
            }
            x += stride;
        }
        y += stride;
    }

    if samples == 0 {
        return Err(ScanFailure::NoSamples);
    }

    let total = samples as f32;
    Ok(SignalSet {
        edge: edge as f32 / total,
        text: text as f32 / total,
        contrast: contrast as f32 / total,
        horizontal_line: h_line as f32 / total,
        vertical_line: v_line as f32 / total,
        document: document as f32 / total,
        structured: structured as f32 / total,
        border: border as f32 / total,
    })
}

/// Reduce signal densities to the detection decision and confidence
fn evaluate(signals: &SignalSet, config: &FrameScorerConfig) -> (bool, f32) {
    let w = &config.weights;

    // Confidence contributed by content signals; the border term is kept
    // apart so a bright ring cannot corroborate itself in the border
    // branch (an all-bright frame must not self-detect)
    let content_confidence = signals.edge * w.edge
        + signals.text * w.text
        + signals.contrast * w.contrast
        + signals.horizontal_line * w.horizontal_line
        + signals.vertical_line * w.vertical_line
        + signals.document * w.document
        + signals.structured * w.structured;
    let confidence = (content_confidence + signals.border * w.border).clamp(0.0, 1.0);

    let has_edges_and_text = signals.edge > MIN_EDGE_DENSITY && signals.text > MIN_TEXT_DENSITY;
    let has_contrast_and_lines = signals.contrast > MIN_CONTRAST_DENSITY
        && (signals.horizontal_line > MIN_LINE_DENSITY
            || signals.vertical_line > MIN_LINE_DENSITY);
    let has_document_structure = config.structured_band.is_some()
        && signals.document > MIN_DOCUMENT_DENSITY
        && signals.structured > MIN_STRUCTURED_DENSITY;
    let has_confident_border = config.border_margin.is_some()
        && signals.border > MIN_BORDER_DENSITY
        && content_confidence > HIGH_CONFIDENCE;

    let detected = has_edges_and_text
        || has_contrast_and_lines
        || has_document_structure
        || has_confident_border
        || confidence > config.confidence_cutoff;

    (detected, confidence)
}

fn timeout_result(budget_ms: u64) -> DetectionResult {
    log::warn!("frame analysis exceeded {}ms budget", budget_ms);
    DetectionResult::not_detected(0.0).with_error_message("analysis budget exceeded")
}

fn total_failure_result(frame: &FrameBuffer, config: &FrameAnalysisConfig) -> DetectionResult {
    if config.assume_present_on_failure {
        log::warn!(
            "frame {} unanalyzable ({} bytes for {}x{}); assuming document present",
            frame.id,
            frame.data.len(),
            frame.width,
            frame.height
        );
        let bounds = document_bounds(frame.width, frame.height, DETECTOR_FRACTION);
        DetectionResult::detected(bounds, ASSUME_PRESENT_CONFIDENCE)
            .with_error_message("assume-present fallback: frame could not be analyzed")
    } else {
        DetectionResult::not_detected(0.0)
            .with_error_message("frame could not be analyzed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(value: u8, width: u32, height: u32) -> FrameBuffer {
        FrameBuffer::new(vec![value; (width * height) as usize], width, height)
    }

    #[test]
    fn test_variant_constants_stay_distinct() {
        let lenient = FrameScorerConfig::lenient();
        let strict = FrameScorerConfig::strict();

        assert_eq!(lenient.stride, 8);
        assert_eq!(strict.stride, 4);
        assert!(lenient.structured_band.is_some());
        assert!(strict.structured_band.is_none());
        assert!(lenient.border_margin.is_some());
        assert!(strict.border_margin.is_none());
        assert!(lenient.confidence_cutoff > strict.confidence_cutoff);
    }

    #[test]
    fn test_weights_are_convex() {
        for config in [FrameScorerConfig::lenient(), FrameScorerConfig::strict()] {
            let total = config.weights.total();
            assert!(
                total <= 1.0 + f32::EPSILON,
                "{} weights sum to {}",
                config.name,
                total
            );
        }
    }

    #[test]
    fn test_uniform_white_not_detected() {
        let frame = uniform_frame(255, 320, 200);
        let result = score_frame(&frame, &FrameScorerConfig::lenient());
        assert!(!result.is_detected);
        assert!(result.confidence <= 0.3);
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        let frame = FrameBuffer::new(Vec::new(), 0, 0);
        let result = analyze_frame(&frame);
        assert!(!result.is_detected);
        assert_eq!(result.confidence, 0.0);
        assert!(result.error_message.is_some());
    }

    #[test]
    fn test_unanalyzable_frame_assumes_present() {
        // Non-zero dimensions but an empty buffer: every sample is
        // skipped, both variants fail, the optimistic fallback applies
        let frame = FrameBuffer::new(Vec::new(), 320, 200);
        let result = analyze_frame(&frame);
        assert!(result.is_detected);
        assert_eq!(result.confidence, ASSUME_PRESENT_CONFIDENCE);
        assert!(result.error_message.is_some());

        let pessimistic = FrameAnalysisConfig {
            assume_present_on_failure: false,
            ..Default::default()
        };
        let result = analyze_frame_with(&frame, &pessimistic);
        assert!(!result.is_detected);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_zero_budget_times_out() {
        let frame = uniform_frame(128, 640, 400);
        let config = FrameAnalysisConfig {
            budget_ms: 0,
            ..Default::default()
        };
        let result = analyze_frame_with(&frame, &config);
        assert!(!result.is_detected);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(
            result.error_message.as_deref(),
            Some("analysis budget exceeded")
        );
    }

    #[test]
    fn test_detection_is_deterministic() {
        let frame = uniform_frame(90, 400, 250);
        let first = analyze_frame(&frame);
        for _ in 0..5 {
            assert_eq!(analyze_frame(&frame), first);
        }
    }
}
