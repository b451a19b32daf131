//! Output representation selection
//!
//! The caller picks a representation with a short code string. `"hex"` and
//! `"cmyk"` select those conversions; any other code, or no code at all,
//! returns the raw RGB buckets. An unknown code is not an error.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{Cmyk, ColorConverter, RgbColor};

/// Requested output representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCode {
    /// Lowercase `rrggbb` strings
    Hex,
    /// `(c, m, y, k)` tuples rounded to two decimals
    Cmyk,
    /// Unconverted `(r, g, b)` tuples
    #[default]
    Rgb,
}

impl ColorCode {
    /// Interpret a code string; unrecognised codes fall back to [`ColorCode::Rgb`]
    ///
    /// Matching is exact: `"HEX"` is not `"hex"`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "hex" => ColorCode::Hex,
            "cmyk" => ColorCode::Cmyk,
            other => {
                if other != "rgb" {
                    debug!("Unrecognised color code {:?}, reporting raw RGB", other);
                }
                ColorCode::Rgb
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCode::Hex => "hex",
            ColorCode::Cmyk => "cmyk",
            ColorCode::Rgb => "rgb",
        }
    }
}

impl FromStr for ColorCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl From<&str> for ColorCode {
    fn from(code: &str) -> Self {
        Self::from_code(code)
    }
}

impl From<Option<&str>> for ColorCode {
    fn from(code: Option<&str>) -> Self {
        code.map(Self::from_code).unwrap_or_default()
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported color in the requested representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattedColor {
    Hex(String),
    Cmyk(Cmyk),
    Rgb(RgbColor),
}

impl FormattedColor {
    pub fn as_hex(&self) -> Option<&str> {
        match self {
            FormattedColor::Hex(hex) => Some(hex),
            _ => None,
        }
    }

    pub fn as_cmyk(&self) -> Option<Cmyk> {
        match self {
            FormattedColor::Cmyk(cmyk) => Some(*cmyk),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<RgbColor> {
        match self {
            FormattedColor::Rgb(rgb) => Some(*rgb),
            _ => None,
        }
    }
}

impl fmt::Display for FormattedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedColor::Hex(hex) => f.write_str(hex),
            FormattedColor::Cmyk(cmyk) => fmt::Display::fmt(cmyk, f),
            FormattedColor::Rgb(rgb) => fmt::Display::fmt(rgb, f),
        }
    }
}

/// Dispatches ranked colors to the requested conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorFormatter {
    converter: ColorConverter,
}

impl ColorFormatter {
    pub fn new(converter: ColorConverter) -> Self {
        Self { converter }
    }

    pub fn format(&self, color: RgbColor, code: ColorCode) -> FormattedColor {
        match code {
            ColorCode::Hex => FormattedColor::Hex(self.converter.rgb_to_hex(color)),
            ColorCode::Cmyk => FormattedColor::Cmyk(self.converter.rgb_to_cmyk(color)),
            ColorCode::Rgb => FormattedColor::Rgb(color),
        }
    }

    /// Format every color, preserving order
    pub fn format_all(&self, colors: &[RgbColor], code: ColorCode) -> Vec<FormattedColor> {
        colors.iter().map(|&color| self.format(color, code)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parsing() {
        assert_eq!(ColorCode::from("hex"), ColorCode::Hex);
        assert_eq!(ColorCode::from("cmyk"), ColorCode::Cmyk);
        assert_eq!(ColorCode::from("rgb"), ColorCode::Rgb);
        assert_eq!(ColorCode::from("HEX"), ColorCode::Rgb);
        assert_eq!(ColorCode::from("pantone"), ColorCode::Rgb);
        assert_eq!(ColorCode::from(""), ColorCode::Rgb);
        assert_eq!(ColorCode::from(None::<&str>), ColorCode::Rgb);
        assert_eq!(ColorCode::from(Some("cmyk")), ColorCode::Cmyk);
        assert_eq!("hex".parse::<ColorCode>(), Ok(ColorCode::Hex));
    }

    #[test]
    fn test_format_dispatch() {
        let formatter = ColorFormatter::default();
        let red = RgbColor::new(224, 0, 0);

        assert_eq!(
            formatter.format(red, ColorCode::Hex),
            FormattedColor::Hex("e00000".to_string())
        );
        assert_eq!(
            formatter.format(red, ColorCode::Cmyk).as_cmyk().map(Cmyk::to_tuple),
            Some((0.0, 1.0, 1.0, 0.12))
        );
        assert_eq!(formatter.format(red, ColorCode::Rgb).as_rgb(), Some(red));
    }

    #[test]
    fn test_format_all_preserves_order() {
        let formatter = ColorFormatter::default();
        let colors = [RgbColor::new(0, 0, 0), RgbColor::new(32, 64, 96)];

        let hex: Vec<String> = formatter
            .format_all(&colors, ColorCode::Hex)
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(hex, vec!["000000", "204060"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FormattedColor::Rgb(RgbColor::new(1, 2, 3)).to_string(),
            "(1, 2, 3)"
        );
        assert_eq!(
            FormattedColor::Cmyk(Cmyk::from([0.0, 1.0, 1.0, 0.12])).to_string(),
            "(0, 1, 1, 0.12)"
        );
    }

    #[test]
    fn test_serialized_shapes() {
        let formatted = vec![
            FormattedColor::Hex("e00000".into()),
            FormattedColor::Rgb(RgbColor::new(224, 0, 0)),
        ];
        assert_eq!(
            serde_json::to_string(&formatted).unwrap(),
            r#"["e00000",[224,0,0]]"#
        );
        assert_eq!(serde_json::to_string(&ColorCode::Cmyk).unwrap(), r#""cmyk""#);
    }
}
