//! Color model and tolerance matching.
//!
//! Channels are kept on the 16-bit scale used by display servers. 8-bit
//! values (what users type and what most capture APIs hand back) are lifted
//! by `<< 8`, so an exact 8-bit match stays an exact 16-bit match.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ColorParseError;

/// Highest value of a single 16-bit channel.
pub const CHANNEL_MAX: u16 = u16::MAX;

/// RGB color on the 16-bit channel scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Color {
    pub fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// Lift an 8-bit triple onto the 16-bit scale.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: lift(r),
            g: lift(g),
            b: lift(b),
        }
    }

    /// Quantize to 8-bit (`channel / 256`).
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8 {
            r: (self.r >> 8) as u8,
            g: (self.g >> 8) as u8,
            b: (self.b >> 8) as u8,
        }
    }
}

impl From<Rgb8> for Color {
    fn from(c: Rgb8) -> Self {
        Self::from_rgb8(c.r, c.g, c.b)
    }
}

fn lift(v: u8) -> u16 {
    u16::from(v) << 8
}

/// 8-bit RGB triple, displayed as `r,g,b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return Err(ColorParseError::Format(s.to_string()));
        };
        Ok(Self::new(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?))
    }
}

fn parse_channel(v: &str) -> Result<u8, ColorParseError> {
    v.parse::<u8>()
        .map_err(|_| ColorParseError::Channel(v.to_string()))
}

/// Answers whether an observed color is within a symmetric per-channel
/// tolerance of a target color.
///
/// Bounds are derived once at construction and clamped to
/// `0..=CHANNEL_MAX`; a tolerance of zero matches the exact color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatcher {
    target: Color,
    min: Color,
    max: Color,
}

impl ColorMatcher {
    pub fn new(target: Color, tolerance: u16) -> Self {
        Self {
            target,
            min: Color::new(
                channel_min(target.r, tolerance),
                channel_min(target.g, tolerance),
                channel_min(target.b, tolerance),
            ),
            max: Color::new(
                channel_max(target.r, tolerance),
                channel_max(target.g, tolerance),
                channel_max(target.b, tolerance),
            ),
        }
    }

    /// Matcher for an 8-bit target with an 8-bit tolerance, both lifted to
    /// the 16-bit scale.
    pub fn from_rgb8(target: Rgb8, tolerance: u8) -> Self {
        Self::new(target.into(), lift(tolerance))
    }

    pub fn exact(target: Color) -> Self {
        Self::new(target, 0)
    }

    pub fn target(&self) -> Color {
        self.target
    }

    /// Inclusive lower bound per channel.
    pub fn min(&self) -> Color {
        self.min
    }

    /// Inclusive upper bound per channel.
    pub fn max(&self) -> Color {
        self.max
    }

    pub fn matches(&self, color: Color) -> bool {
        (self.min.r..=self.max.r).contains(&color.r)
            && (self.min.g..=self.max.g).contains(&color.g)
            && (self.min.b..=self.max.b).contains(&color.b)
    }
}

fn channel_min(value: u16, tolerance: u16) -> u16 {
    value.saturating_sub(tolerance)
}

fn channel_max(value: u16, tolerance: u16) -> u16 {
    let sum = u32::from(value) + u32::from(tolerance);
    sum.min(u32::from(CHANNEL_MAX)) as u16
}
