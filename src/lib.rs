//! # Top Colors
//!
//! A Rust crate for reporting the dominant colors of a raster image.
//!
//! The analysis is a single left-to-right pipeline:
//! - Load the image and flatten it to 8-bit RGB
//! - Downscale large images by a first-match threshold table
//! - Posterize every channel to 3 bits
//! - Count each posterized color and keep the 15 most frequent
//! - Report them as hex strings, CMYK tuples or raw RGB triples
//!
//! Counting is exact; there is no clustering step.
//!
//! ## Example
//!
//! ```rust,no_run
//! use top_colors::analyze_image_colors;
//! use std::path::Path;
//!
//! let colors = analyze_image_colors(Path::new("photo.png"), "hex")?;
//! for color in &colors {
//!     println!("{}", color);
//! }
//! # Ok::<(), top_colors::AnalysisError>(())
//! ```

use std::path::Path;

use image::{DynamicImage, RgbImage};
use log::debug;
use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod preprocess;

pub use color::{
    Cmyk, ColorAnalyzer, ColorCode, ColorConverter, ColorCount, ColorFormatter, FormattedColor,
    RankedColors, RgbColor,
};
pub use config::{AnalysisConfig, ResizeFilter, ScaleRule, ScalingConfig};
pub use error::{AnalysisError, Result};

use preprocess::{Downscaler, Posterizer};

/// One reported color with its frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Color in the requested representation
    pub color: FormattedColor,
    /// Posterized RGB bucket the color was counted in
    pub rgb: RgbColor,
    /// Pixels in the analysed (possibly downscaled) image
    pub count: u64,
    /// `count` as a fraction of all analysed pixels
    pub share: f64,
}

/// Complete analysis result with image statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    /// Representation used for `colors`
    pub code: ColorCode,
    /// Width and height as decoded
    pub source_dimensions: (u32, u32),
    /// Width and height after downscaling
    pub analyzed_dimensions: (u32, u32),
    /// Distinct posterized colors in the analysed image
    pub distinct_colors: usize,
    /// Most frequent colors, highest count first
    pub colors: Vec<ReportEntry>,
}

impl ColorReport {
    /// Reported colors without statistics
    pub fn formatted(&self) -> Vec<FormattedColor> {
        self.colors.iter().map(|entry| entry.color.clone()).collect()
    }
}

/// Configured color extraction pipeline
///
/// Holds no state between calls; one pipeline can serve any number of
/// images, from any number of threads.
#[derive(Debug, Clone)]
pub struct ColorPipeline {
    downscaler: Downscaler,
    posterizer: Posterizer,
    analyzer: ColorAnalyzer,
    formatter: ColorFormatter,
}

impl Default for ColorPipeline {
    fn default() -> Self {
        Self::from_valid_config(&AnalysisConfig::default())
    }
}

impl ColorPipeline {
    /// Build a pipeline from `config`
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidParameter`] if the configuration fails validation
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &AnalysisConfig) -> Self {
        Self {
            downscaler: Downscaler::new(&config.scaling),
            posterizer: Posterizer::new(config.posterize_bits),
            analyzer: ColorAnalyzer::with_top_k(config.top_k),
            formatter: ColorFormatter::default(),
        }
    }

    /// Downscale, posterize and rank an already decoded image
    pub fn rank(&self, image: RgbImage) -> RankedColors {
        let scaled = self.downscaler.apply(image);
        let posterized = self.posterizer.apply(scaled);
        self.analyzer.top_colors(&posterized)
    }

    /// Load `path` and rank its colors
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ImageLoadError`] if the file cannot be opened or decoded
    pub fn ranked_colors(&self, path: &Path) -> Result<RankedColors> {
        let image = image_loader::load_image(path)?;
        Ok(self.rank(image))
    }

    /// Analyze the image at `path`, returning its top colors as `code` asks
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ImageLoadError`] if the file cannot be opened or decoded
    pub fn analyze(&self, path: &Path, code: impl Into<ColorCode>) -> Result<Vec<FormattedColor>> {
        let code = code.into();
        let ranked = self.ranked_colors(path)?;
        debug!(
            "Reporting {} of {} colors from {} as {}",
            ranked.len(),
            ranked.distinct_colors(),
            path.display(),
            code
        );
        Ok(self.formatter.format_all(&ranked.colors(), code))
    }

    /// Analyze an in-memory image
    pub fn analyze_image(
        &self,
        image: &DynamicImage,
        code: impl Into<ColorCode>,
    ) -> Vec<FormattedColor> {
        let ranked = self.rank(image.to_rgb8());
        self.formatter.format_all(&ranked.colors(), code.into())
    }

    /// Analyze the image at `path` and keep the per-color statistics
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ImageLoadError`] if the file cannot be opened or decoded
    pub fn report(&self, path: &Path, code: impl Into<ColorCode>) -> Result<ColorReport> {
        let code = code.into();
        let image = image_loader::load_image(path)?;
        let source_dimensions = image.dimensions();

        let scaled = self.downscaler.apply(image);
        let analyzed_dimensions = scaled.dimensions();
        let ranked = self.analyzer.top_colors(&self.posterizer.apply(scaled));

        let colors = ranked
            .entries()
            .iter()
            .map(|entry| ReportEntry {
                color: self.formatter.format(entry.color, code),
                rgb: entry.color,
                count: entry.count,
                share: ranked.share(entry),
            })
            .collect();

        Ok(ColorReport {
            code,
            source_dimensions,
            analyzed_dimensions,
            distinct_colors: ranked.distinct_colors(),
            colors,
        })
    }
}

/// Report the dominant colors of an image file
///
/// This is the main entry point. It runs the reference pipeline (scaling
/// table, 3-bit posterization, top 15 colors) and formats the result:
/// `"hex"` gives lowercase hex strings, `"cmyk"` gives CMYK tuples, and any
/// other code (or `None`) gives raw RGB triples.
///
/// # Errors
///
/// Returns [`AnalysisError::ImageLoadError`] if the path does not exist, is
/// unreadable, or is not a decodable image
pub fn analyze_image_colors(
    path: &Path,
    code: impl Into<ColorCode>,
) -> Result<Vec<FormattedColor>> {
    ColorPipeline::default().analyze(path, code)
}
