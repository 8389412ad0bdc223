use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 8-bit RGBA color as used by the slider configuration.
///
/// Parses from hex (`#RGB`, `#RRGGBB` or `#RRGGBBAA`, leading `#` optional)
/// and always prints as `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgba<u8>);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid hex color {0:?}")]
pub struct ColorParseError(String);

impl Color {
    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, u8::MAX)
    }

    pub fn alpha(&self) -> u8 {
        self.0.alpha
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha() == u8::MAX
    }

    /// Same color with the alpha channel forced to 255.
    pub fn opaque(&self) -> Self {
        Self::rgb(self.0.red, self.0.green, self.0.blue)
    }

    /// Only the alpha channel survives, color channels are zeroed.
    pub fn alpha_only(&self) -> Self {
        Self::rgba(0, 0, 0, self.alpha())
    }

    pub fn into_f64(self) -> Srgba<f64> {
        self.0.into_format::<f64, f64>()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| err())
        };
        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_components();
        write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// The two colors the compositor works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderColors {
    pub filled: Color,
    pub empty: Color,
}

impl SliderColors {
    pub fn new(filled: Color, empty: Color) -> Self {
        Self { filled, empty }
    }
}
