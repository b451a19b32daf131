//! Reference constants for the color extraction pipeline
//!
//! These values define the default behaviour of [`crate::AnalysisConfig`].
//! They are kept here so tests and callers can refer to the reference
//! numbers without building a configuration.

/// Downscaling thresholds applied before counting colors
pub mod scaling {
    /// `(minimum dimension, scale factor)` pairs in ascending threshold order.
    ///
    /// The first pair whose threshold is reached by either the width or the
    /// height wins; later pairs are never consulted.
    pub const DEFAULT_RULES: [(u32, f64); 4] = [(400, 0.2), (600, 0.4), (800, 0.5), (1200, 0.6)];
}

/// Posterization parameters
pub mod quantize {
    /// Bits kept per channel (8 levels: 0, 32, ..., 224)
    pub const DEFAULT_BITS: u8 = 3;

    /// Widest channel depth; posterizing to this many bits is the identity
    pub const MAX_BITS: u8 = 8;

    /// Mask applied to every channel for the default bit depth
    pub const DEFAULT_MASK: u8 = 0xE0;
}

/// Ranking and formatting parameters
pub mod ranking {
    /// Number of colors reported
    pub const TOP_K: usize = 15;

    /// Decimal places kept for CMYK components
    pub const CMYK_DECIMALS: i32 = 2;
}

/// File extensions accepted by the upload layer
pub const UPLOAD_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_rules_ascending() {
        for pair in scaling::DEFAULT_RULES.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        for (_, factor) in scaling::DEFAULT_RULES {
            assert!(factor > 0.0 && factor <= 1.0);
        }
        assert_eq!(scaling::DEFAULT_RULES[0], (400, 0.2));
    }

    #[test]
    fn test_default_mask_matches_bits() {
        let mask = !((1u16 << (quantize::MAX_BITS - quantize::DEFAULT_BITS)) - 1) as u8;
        assert_eq!(mask, quantize::DEFAULT_MASK);
    }
}
