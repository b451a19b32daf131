//! Color frequency counting and ranking
//!
//! Counts every posterized pixel into a bucket table and keeps the most
//! frequent buckets.
//!
//! Ties are broken by the order in which buckets were first seen while
//! scanning the image row by row. The table preserves insertion order and
//! the ranking sort is stable, so repeated runs on identical input always
//! produce the same list.

use image::RgbImage;
use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::RgbColor;
use crate::constants::ranking::TOP_K;

/// Bucket occurrence counts in first-seen order
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: IndexMap<RgbColor, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `color`
    #[inline]
    pub fn record(&mut self, color: RgbColor) {
        *self.counts.entry(color).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, color: RgbColor) -> u64 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Number of distinct buckets seen
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of pixels recorded
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Buckets and counts in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (RgbColor, u64)> + '_ {
        self.counts.iter().map(|(color, count)| (*color, *count))
    }
}

/// A bucket together with its pixel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCount {
    pub color: RgbColor,
    pub count: u64,
}

/// Most frequent buckets of one image, highest count first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedColors {
    colors: Vec<ColorCount>,
    total_pixels: u64,
    distinct_colors: usize,
}

impl RankedColors {
    pub fn entries(&self) -> &[ColorCount] {
        &self.colors
    }

    /// Ranked bucket colors without their counts
    pub fn colors(&self) -> Vec<RgbColor> {
        self.colors.iter().map(|entry| entry.color).collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Pixels counted across all buckets, not only the ranked ones
    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    /// Distinct buckets in the full table
    pub fn distinct_colors(&self) -> usize {
        self.distinct_colors
    }

    /// Fraction of analysed pixels that fell into `entry`'s bucket
    pub fn share(&self, entry: &ColorCount) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            entry.count as f64 / self.total_pixels as f64
        }
    }
}

/// Color analyzer implementing exact frequency ranking
#[derive(Debug, Clone, Copy)]
pub struct ColorAnalyzer {
    top_k: usize,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAnalyzer {
    /// Create an analyzer reporting the reference number of colors
    pub fn new() -> Self {
        Self { top_k: TOP_K }
    }

    pub fn with_top_k(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Count every pixel of `image` exactly once, row by row
    pub fn tally(&self, image: &RgbImage) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for pixel in image.pixels() {
            table.record(RgbColor::from(*pixel));
        }
        debug!(
            "Tallied {} pixels into {} buckets",
            table.total(),
            table.distinct()
        );
        table
    }

    /// Keep the `top_k` most frequent buckets
    ///
    /// Returns every bucket when fewer than `top_k` exist.
    pub fn rank(&self, table: &FrequencyTable) -> RankedColors {
        let mut colors: Vec<ColorCount> = table
            .iter()
            .map(|(color, count)| ColorCount { color, count })
            .collect();

        // Stable: equal counts keep first-seen order
        colors.sort_by(|a, b| b.count.cmp(&a.count));
        colors.truncate(self.top_k);

        if let Some(top) = colors.first() {
            trace!("Most frequent bucket {} x{}", top.color, top.count);
        }

        RankedColors {
            colors,
            total_pixels: table.total(),
            distinct_colors: table.distinct(),
        }
    }

    /// Tally then rank
    pub fn top_colors(&self, image: &RgbImage) -> RankedColors {
        self.rank(&self.tally(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_color_analyzer_creation() {
        assert_eq!(ColorAnalyzer::new().top_k(), 15);
        assert_eq!(ColorAnalyzer::with_top_k(3).top_k(), 3);
    }

    #[test]
    fn test_single_bucket() {
        let img = RgbImage::from_pixel(300, 300, Rgb([224, 0, 0]));
        let ranked = ColorAnalyzer::new().top_colors(&img);

        assert_eq!(
            ranked.entries(),
            &[ColorCount {
                color: RgbColor::new(224, 0, 0),
                count: 90_000
            }]
        );
        assert_eq!(ranked.total_pixels(), 90_000);
        assert_eq!(ranked.distinct_colors(), 1);
        assert_eq!(ranked.share(&ranked.entries()[0]), 1.0);
    }

    #[test]
    fn test_fewer_buckets_than_k() {
        let img = RgbImage::from_fn(4, 1, |x, _| Rgb([(x * 32) as u8, 0, 0]));
        let ranked = ColorAnalyzer::new().top_colors(&img);

        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked.distinct_colors(), 4);
    }

    #[test]
    fn test_descending_counts() {
        // 3 blue, 2 green, 1 red
        let pixels = [
            [0, 0, 224],
            [0, 224, 0],
            [0, 0, 224],
            [224, 0, 0],
            [0, 224, 0],
            [0, 0, 224],
        ];
        let img = RgbImage::from_fn(6, 1, |x, _| Rgb(pixels[x as usize]));
        let ranked = ColorAnalyzer::new().top_colors(&img);

        let counts: Vec<u64> = ranked.entries().iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
        assert_eq!(
            ranked.colors(),
            vec![
                RgbColor::new(0, 0, 224),
                RgbColor::new(0, 224, 0),
                RgbColor::new(224, 0, 0)
            ]
        );
    }

    #[test]
    fn test_ties_follow_first_seen_order() {
        // 20 colors, one pixel each, scanned left to right
        let img = RgbImage::from_fn(20, 1, |x, _| Rgb([x as u8, 0, 0]));
        let ranked = ColorAnalyzer::new().top_colors(&img);

        assert_eq!(ranked.len(), 15);
        let reds: Vec<u8> = ranked.colors().iter().map(|c| c.red).collect();
        assert_eq!(reds, (0..15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_table_counts() {
        let mut table = FrequencyTable::new();
        assert!(table.is_empty());

        table.record(RgbColor::new(1, 1, 1));
        table.record(RgbColor::new(2, 2, 2));
        table.record(RgbColor::new(1, 1, 1));

        assert_eq!(table.count(RgbColor::new(1, 1, 1)), 2);
        assert_eq!(table.count(RgbColor::new(9, 9, 9)), 0);
        assert_eq!(table.total(), 3);
        assert_eq!(table.distinct(), 2);
        assert_eq!(
            table.iter().map(|(c, _)| c).collect::<Vec<_>>(),
            vec![RgbColor::new(1, 1, 1), RgbColor::new(2, 2, 2)]
        );
    }

    #[test]
    fn test_empty_image() {
        let img = RgbImage::new(0, 0);
        let ranked = ColorAnalyzer::new().top_colors(&img);

        assert!(ranked.is_empty());
        assert_eq!(ranked.total_pixels(), 0);
    }
}
