//! Configuration management for docscan
//!
//! Provides configuration loading, saving, and management for detection
//! strides and budgets and for the processing pipeline's tunables.
//! Defaults come from the module constants so file configuration and code
//! cannot drift apart.

use crate::detector::frame::{
    FrameAnalysisConfig, FrameScorerConfig, ASSUME_PRESENT_ON_FAILURE, FRAME_BUDGET_MS,
};
use crate::errors::ScanError;
use crate::pipeline::background::{BACKGROUND_TOLERANCE, EDGE_SAMPLE_STRIDE};
use crate::pipeline::enhance::{CONTRAST_SCALE, SATURATION_BOOST};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocscanConfig {
    pub detection: DetectionConfig,
    pub processing: ProcessingConfig,
}

/// Live-frame detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Sampling stride of the lenient variant
    pub lenient_stride: usize,
    /// Sampling stride of the strict fallback variant
    pub strict_stride: usize,
    /// Wall-clock budget per frame in milliseconds
    pub frame_budget_ms: u64,
    /// Report the document as present when a frame cannot be analyzed at
    /// all (see DESIGN.md before disabling)
    pub assume_present_on_failure: bool,
}

/// Capture post-processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// RGB distance at or below which a pixel counts as background
    pub background_tolerance: f32,
    /// Sampling stride along image edges for the background estimate
    pub edge_sample_stride: u32,
    /// Saturation factor of the enhancement matrix
    pub saturation: f32,
    /// Uniform RGB scale of the enhancement matrix
    pub contrast_scale: f32,
}

impl Default for DocscanConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig {
                lenient_stride: FrameScorerConfig::lenient().stride,
                strict_stride: FrameScorerConfig::strict().stride,
                frame_budget_ms: FRAME_BUDGET_MS,
                assume_present_on_failure: ASSUME_PRESENT_ON_FAILURE,
            },
            processing: ProcessingConfig {
                background_tolerance: BACKGROUND_TOLERANCE,
                edge_sample_stride: EDGE_SAMPLE_STRIDE,
                saturation: SATURATION_BOOST,
                contrast_scale: CONTRAST_SCALE,
            },
        }
    }
}

impl DetectionConfig {
    /// Build the frame-analysis chain configuration with these overrides
    pub fn analysis(&self) -> FrameAnalysisConfig {
        FrameAnalysisConfig {
            lenient: FrameScorerConfig::lenient().with_stride(self.lenient_stride),
            strict: FrameScorerConfig::strict().with_stride(self.strict_stride),
            budget_ms: self.frame_budget_ms,
            assume_present_on_failure: self.assume_present_on_failure,
        }
    }
}

impl DocscanConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ScanError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: DocscanConfig = toml::from_str(&contents)
            .map_err(|e| ScanError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ScanError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ScanError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ScanError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| ScanError::ConfigError(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("docscan.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.detection.lenient_stride == 0 || self.detection.lenient_stride > 64 {
            return Err("Lenient stride must be between 1 and 64".to_string());
        }
        if self.detection.strict_stride == 0 || self.detection.strict_stride > 64 {
            return Err("Strict stride must be between 1 and 64".to_string());
        }
        if self.detection.frame_budget_ms == 0 || self.detection.frame_budget_ms > 10_000 {
            return Err("Frame budget must be between 1 and 10000 ms".to_string());
        }

        // Maximum possible RGB distance is sqrt(3) * 255 ~= 441.7
        if !(0.0..=442.0).contains(&self.processing.background_tolerance) {
            return Err("Background tolerance must be between 0 and 442".to_string());
        }
        if self.processing.edge_sample_stride == 0 {
            return Err("Edge sample stride must be at least 1".to_string());
        }
        if !(0.0..=4.0).contains(&self.processing.saturation) {
            return Err("Saturation must be between 0.0 and 4.0".to_string());
        }
        if !(0.0..=4.0).contains(&self.processing.contrast_scale) {
            return Err("Contrast scale must be between 0.0 and 4.0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocscanConfig::default();
        assert_eq!(config.detection.lenient_stride, 8);
        assert_eq!(config.detection.strict_stride, 4);
        assert_eq!(config.detection.frame_budget_ms, 100);
        assert!(config.detection.assume_present_on_failure);
    }

    #[test]
    fn test_config_validation() {
        let config = DocscanConfig::default();
        assert!(config.validate().is_ok());

        let mut bad_config = config.clone();
        bad_config.detection.lenient_stride = 0;
        assert!(bad_config.validate().is_err());

        let mut bad_processing = DocscanConfig::default();
        bad_processing.processing.background_tolerance = 500.0;
        assert!(bad_processing.validate().is_err());
    }

    #[test]
    fn test_analysis_config_applies_overrides() {
        let mut config = DocscanConfig::default();
        config.detection.lenient_stride = 16;
        config.detection.frame_budget_ms = 50;

        let analysis = config.detection.analysis();
        assert_eq!(analysis.lenient.stride, 16);
        // Everything else stays at the variant constants
        assert_eq!(analysis.lenient.edge_threshold, 50);
        assert_eq!(analysis.strict.stride, 4);
        assert_eq!(analysis.budget_ms, 50);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("test_docscan.toml");

        let mut config = DocscanConfig::default();
        config.detection.frame_budget_ms = 250;
        assert!(config.save_to_file(&config_path).is_ok());

        let loaded = DocscanConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.detection.frame_budget_ms, 250);
        assert_eq!(
            loaded.processing.background_tolerance,
            config.processing.background_tolerance
        );
    }

    #[test]
    fn test_config_toml_format() {
        let config = DocscanConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[detection]"));
        assert!(toml_string.contains("[processing]"));
        assert!(toml_string.contains("lenient_stride"));
        assert!(toml_string.contains("background_tolerance"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = DocscanConfig::load_from_file("nonexistent_file.toml");
        assert!(result.is_ok()); // Should return default
        assert_eq!(result.unwrap().detection.lenient_stride, 8);
    }
}
