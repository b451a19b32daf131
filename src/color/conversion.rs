//! Color representation conversions
//!
//! Provides conversions from posterized RGB buckets to:
//! - lowercase `rrggbb` hexadecimal strings (and back)
//! - CMYK tuples rounded to a fixed number of decimals

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::constants::ranking::CMYK_DECIMALS;
use crate::{AnalysisError, Result};

/// 8-bit RGB color, serialized as a `[r, g, b]` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(color: RgbColor) -> Self {
        color.channels()
    }
}

impl From<image::Rgb<u8>> for RgbColor {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

/// Normalize to [0, 1] by dividing by 255
///
/// `Srgb::into_format` multiplies by the reciprocal instead, which can land
/// one ulp away and flip a two-decimal rounding.
impl From<RgbColor> for Srgb<f64> {
    fn from(color: RgbColor) -> Self {
        let [red, green, blue] = color.channels().map(|c| f64::from(c) / 255.0);
        Srgb::new(red, green, blue)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// CMYK color with components in [0, 1], serialized as `[c, m, y, k]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Cmyk {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub key: f64,
}

impl Cmyk {
    pub fn to_tuple(self) -> (f64, f64, f64, f64) {
        (self.cyan, self.magenta, self.yellow, self.key)
    }
}

impl From<[f64; 4]> for Cmyk {
    fn from([cyan, magenta, yellow, key]: [f64; 4]) -> Self {
        Self {
            cyan,
            magenta,
            yellow,
            key,
        }
    }
}

impl From<Cmyk> for [f64; 4] {
    fn from(cmyk: Cmyk) -> Self {
        [cmyk.cyan, cmyk.magenta, cmyk.yellow, cmyk.key]
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.cyan, self.magenta, self.yellow, self.key
        )
    }
}

/// Converter between RGB buckets and the reported representations
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter {
    /// Decimal places kept for CMYK components
    cmyk_decimals: i32,
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    pub fn new() -> Self {
        Self {
            cmyk_decimals: CMYK_DECIMALS,
        }
    }

    /// Convert RGB to a lowercase, zero-padded hex string
    ///
    /// # Returns
    ///
    /// Six hex digits without a prefix (e.g., "e00000")
    pub fn rgb_to_hex(&self, color: RgbColor) -> String {
        format!("{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
    }

    /// Parse hexadecimal color string to RGB
    ///
    /// Accepts an optional leading `#` and either letter case.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidParameter`] if the string is not six hex digits
    pub fn hex_to_rgb(&self, hex: &str) -> Result<RgbColor> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix alone would let a leading '+' through
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AnalysisError::invalid_parameter("hex color", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| AnalysisError::invalid_parameter("hex color", hex))
        };

        Ok(RgbColor::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert RGB to CMYK using the subtractive formula
    ///
    /// K = 1 - max(R, G, B) on normalized channels. Pure black has no
    /// chromatic component, so C, M and Y are zero there.
    pub fn rgb_to_cmyk(&self, color: RgbColor) -> Cmyk {
        let rgb = Srgb::<f64>::from(color);
        let key = 1.0 - rgb.red.max(rgb.green).max(rgb.blue);

        let (cyan, magenta, yellow) = if key < 1.0 {
            let white = 1.0 - key;
            (
                (1.0 - rgb.red - key) / white,
                (1.0 - rgb.green - key) / white,
                (1.0 - rgb.blue - key) / white,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Cmyk {
            cyan: self.round(cyan),
            magenta: self.round(magenta),
            yellow: self.round(yellow),
            key: self.round(key),
        }
    }

    /// Round to the configured number of decimals
    ///
    /// Decimal formatting rounds the exact binary value, so 0.815 (stored
    /// just below) becomes 0.81 and 0.505 (stored just above) becomes 0.51.
    fn round(&self, value: f64) -> f64 {
        let decimals = usize::try_from(self.cmyk_decimals).unwrap_or(0);
        let rounded = format!("{:.*}", decimals, value)
            .parse::<f64>()
            .unwrap_or(value);
        // Folds -0.0 into 0.0
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}
