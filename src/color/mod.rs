//! Color counting and representation module
//!
//! This module ranks posterized buckets by frequency and converts the
//! winners into the representation the caller asked for.

pub mod analysis;
pub mod conversion;
pub mod format;

pub use analysis::{ColorAnalyzer, ColorCount, FrequencyTable, RankedColors};
pub use conversion::{Cmyk, ColorConverter, RgbColor};
pub use format::{ColorCode, ColorFormatter, FormattedColor};
