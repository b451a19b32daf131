//! Threshold-driven downscaling
//!
//! Large images are shrunk once, by the factor of the first rule whose
//! threshold is reached by either dimension. Rules are never combined.

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::{debug, trace};

use crate::config::{ScaleRule, ScalingConfig};

/// Downscaler applying a first-match-wins scaling table
#[derive(Debug, Clone)]
pub struct Downscaler {
    enabled: bool,
    rules: Vec<ScaleRule>,
    filter: FilterType,
}

impl Default for Downscaler {
    fn default() -> Self {
        Self::new(&ScalingConfig::default())
    }
}

impl Downscaler {
    pub fn new(config: &ScalingConfig) -> Self {
        Self {
            enabled: config.enabled,
            rules: config.rules.clone(),
            filter: config.filter.into(),
        }
    }

    /// Factor of the first rule matched by `width` or `height`
    pub fn select_factor(&self, width: u32, height: u32) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| width >= rule.min_dimension || height >= rule.min_dimension)
            .map(|rule| rule.factor)
    }

    /// Dimensions after scaling, or `None` when the image is kept as is
    ///
    /// Each side is rounded half-to-even and never drops below one pixel.
    pub fn target_dimensions(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let factor = self.select_factor(width, height)?;
        let scale = |dim: u32| ((dim as f64 * factor).round_ties_even() as u32).max(1);
        let target = (scale(width), scale(height));
        trace!(
            "Scale factor {} maps {}x{} to {}x{}",
            factor,
            width,
            height,
            target.0,
            target.1
        );
        (target != (width, height)).then_some(target)
    }

    /// Shrink `image` if a rule matches, otherwise return it untouched
    pub fn apply(&self, image: RgbImage) -> RgbImage {
        let (width, height) = image.dimensions();
        match self.target_dimensions(width, height) {
            Some((new_width, new_height)) => {
                debug!(
                    "Downscaling {}x{} to {}x{}",
                    width, height, new_width, new_height
                );
                imageops::resize(&image, new_width, new_height, self.filter)
            }
            None => image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_below_threshold_unscaled() {
        let scaler = Downscaler::default();
        assert_eq!(scaler.select_factor(300, 300), None);
        assert_eq!(scaler.select_factor(399, 399), None);

        let img = RgbImage::from_pixel(300, 300, Rgb([255, 0, 0]));
        let out = scaler.apply(img);
        assert_eq!(out.dimensions(), (300, 300));
    }

    #[test]
    fn test_first_match_wins() {
        let scaler = Downscaler::default();

        // Every image at or above 400 on either side matches the first rule.
        assert_eq!(scaler.select_factor(400, 10), Some(0.2));
        assert_eq!(scaler.select_factor(10, 650), Some(0.2));
        assert_eq!(scaler.select_factor(900, 900), Some(0.2));
        assert_eq!(scaler.select_factor(4000, 3000), Some(0.2));
    }

    #[test]
    fn test_later_rules_reachable_with_custom_table() {
        let config = ScalingConfig {
            rules: vec![
                ScaleRule {
                    min_dimension: 1200,
                    factor: 0.6,
                },
                ScaleRule {
                    min_dimension: 1600,
                    factor: 0.25,
                },
            ],
            ..ScalingConfig::default()
        };
        let scaler = Downscaler::new(&config);

        assert_eq!(scaler.select_factor(1000, 1000), None);
        assert_eq!(scaler.select_factor(1300, 10), Some(0.6));
        assert_eq!(scaler.select_factor(2000, 2000), Some(0.6));
    }

    #[test]
    fn test_500_by_100_scales_to_100_by_20() {
        let scaler = Downscaler::default();
        assert_eq!(scaler.target_dimensions(500, 100), Some((100, 20)));

        let img = RgbImage::from_pixel(500, 100, Rgb([10, 200, 30]));
        let out = scaler.apply(img);
        assert_eq!(out.dimensions(), (100, 20));
    }

    #[test]
    fn test_thin_image_keeps_one_pixel() {
        let scaler = Downscaler::default();
        assert_eq!(scaler.target_dimensions(1000, 2), Some((200, 1)));
    }

    #[test]
    fn test_disabled_scaler_is_identity() {
        let config = ScalingConfig {
            enabled: false,
            ..ScalingConfig::default()
        };
        let scaler = Downscaler::new(&config);
        assert_eq!(scaler.target_dimensions(5000, 5000), None);
    }

    #[test]
    fn test_resampling_is_deterministic() {
        let scaler = Downscaler::default();
        let img = RgbImage::from_fn(450, 410, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });

        let first = scaler.apply(img.clone());
        let second = scaler.apply(img);
        assert_eq!(first.dimensions(), (90, 82));
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
