//! Per-channel posterization
//!
//! Keeps the high `bits` of every channel and clears the rest, so with the
//! default 3 bits each channel lands on one of 0, 32, 64, ..., 224.

use image::RgbImage;
use log::debug;

use crate::constants::quantize;

/// Channel bit-depth reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posterizer {
    mask: u8,
}

impl Default for Posterizer {
    fn default() -> Self {
        Self::new(quantize::DEFAULT_BITS)
    }
}

impl Posterizer {
    /// Create a posterizer keeping `bits` bits per channel
    ///
    /// `bits` is clamped to 1..=8; configuration validation rejects values
    /// outside that range before they get here.
    pub fn new(bits: u8) -> Self {
        let bits = bits.clamp(1, quantize::MAX_BITS);
        let dropped = quantize::MAX_BITS - bits;
        Self {
            mask: 0xFFu8 << dropped,
        }
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Every value a posterized channel can take, ascending
    pub fn levels(&self) -> Vec<u8> {
        (0..=u8::MAX)
            .filter(|v| v & self.mask == *v)
            .collect()
    }

    #[inline]
    pub fn channel(&self, value: u8) -> u8 {
        value & self.mask
    }

    /// Posterize every channel of `image` in place
    pub fn apply(&self, mut image: RgbImage) -> RgbImage {
        debug!(
            "Posterizing {}x{} with mask {:#04x}",
            image.width(),
            image.height(),
            self.mask
        );
        for value in image.iter_mut() {
            *value &= self.mask;
        }
        image
    }
}
