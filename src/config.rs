//! Configuration structures for the top_colors analysis pipeline.
//!
//! All tunable parameters are passed explicitly to [`crate::ColorPipeline`];
//! nothing is read from process-wide state.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use top_colors::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), top_colors::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ScalingConfig`]: downscale thresholds and resampling filter
//! - `posterize_bits`: bits kept per channel before counting
//! - `top_k`: number of colors reported

use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::constants::{quantize, ranking, scaling};
use crate::{AnalysisError, Result};

/// Complete pipeline configuration for color analysis.
///
/// The default reproduces the reference behaviour: the four-step scaling
/// table, 3-bit posterization and the top 15 colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Downscaling configuration
    #[serde(default)]
    pub scaling: ScalingConfig,

    /// Bits kept per channel (1-8)
    #[serde(default = "default_posterize_bits")]
    pub posterize_bits: u8,

    /// Number of colors reported
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// Downscaling parameters.
///
/// `rules` is a priority table: the first rule whose `min_dimension` is
/// reached by the width or the height is applied, and only that one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Apply downscaling at all
    pub enabled: bool,

    /// Threshold table in ascending `min_dimension` order
    pub rules: Vec<ScaleRule>,

    /// Resampling filter used when a rule matches
    #[serde(default)]
    pub filter: ResizeFilter,
}

/// One row of the scaling table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRule {
    /// Width or height at or above which the rule matches
    pub min_dimension: u32,

    /// Factor applied to both dimensions (0.0 < factor <= 1.0)
    pub factor: f64,
}

/// Resampling filters exposed in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    #[default]
    Bicubic,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::Bicubic => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

fn default_posterize_bits() -> u8 {
    quantize::DEFAULT_BITS
}

fn default_top_k() -> usize {
    ranking::TOP_K
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rules: scaling::DEFAULT_RULES
                .iter()
                .map(|&(min_dimension, factor)| ScaleRule {
                    min_dimension,
                    factor,
                })
                .collect(),
            filter: ResizeFilter::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scaling: ScalingConfig::default(),
            posterize_bits: default_posterize_bits(),
            top_k: default_top_k(),
        }
    }
}

impl AnalysisConfig {
    /// Check every parameter is in range
    pub fn validate(&self) -> Result<()> {
        if self.posterize_bits == 0 || self.posterize_bits > quantize::MAX_BITS {
            return Err(AnalysisError::invalid_parameter(
                "posterize_bits",
                self.posterize_bits,
            ));
        }

        if self.top_k == 0 {
            return Err(AnalysisError::invalid_parameter("top_k", self.top_k));
        }

        for (index, rule) in self.scaling.rules.iter().enumerate() {
            if !(rule.factor > 0.0 && rule.factor <= 1.0) {
                return Err(AnalysisError::invalid_parameter(
                    format!("scaling.rules[{}].factor", index),
                    rule.factor,
                ));
            }
        }

        // NaN factors are caught above, so only ordering is left
        if let Some(pair) = self
            .scaling
            .rules
            .windows(2)
            .find(|pair| pair[0].min_dimension >= pair[1].min_dimension)
        {
            return Err(AnalysisError::invalid_parameter(
                "scaling.rules",
                format!(
                    "thresholds must ascend ({} >= {})",
                    pair[0].min_dimension, pair[1].min_dimension
                ),
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_matches_reference_table() {
        let config = AnalysisConfig::default();

        assert!(config.validate().is_ok());
        assert!(config.scaling.enabled);
        assert_eq!(config.posterize_bits, 3);
        assert_eq!(config.top_k, 15);

        let rules: Vec<(u32, f64)> = config
            .scaling
            .rules
            .iter()
            .map(|r| (r.min_dimension, r.factor))
            .collect();
        assert_eq!(rules, vec![(400, 0.2), (600, 0.4), (800, 0.5), (1200, 0.6)]);
    }

    #[test]
    fn test_validate_rejects_bad_bits() {
        let mut config = AnalysisConfig::default();
        config.posterize_bits = 0;
        assert!(config.validate().is_err());

        config.posterize_bits = 9;
        assert!(config.validate().is_err());

        config.posterize_bits = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        let mut config = AnalysisConfig::default();
        config.scaling.rules[1].factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.scaling.rules[2].factor = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.scaling.rules.swap(0, 3);
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AnalysisConfig::default();
        config.top_k = 5;
        config.scaling.filter = ResizeFilter::Lanczos3;
        config.to_json_file(&path).unwrap();

        let loaded = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{ "top_k": 8 }"#).unwrap();

        assert_eq!(config.top_k, 8);
        assert_eq!(config.posterize_bits, 3);
        assert_eq!(config.scaling, ScalingConfig::default());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = AnalysisConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(err, AnalysisError::ConfigError { .. }));
    }
}
