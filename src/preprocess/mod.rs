//! Image preparation ahead of color counting
//!
//! This module bounds the amount of work done by the tally stage and
//! collapses near-duplicate colors into shared buckets.

pub mod scaling;
pub mod posterize;

pub use scaling::Downscaler;
pub use posterize::Posterizer;
