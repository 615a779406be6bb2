#![forbid(unsafe_code)]

//! CSS colours.
//!
//! [`Rgba`] holds 8-bit channels plus a floating alpha in `[0, 1]`, matching
//! what canvas `fillStyle`/`strokeStyle` accept. Config files spell colours as
//! CSS strings (`"#3b82f6"`, `"#0f0"`, `"green"`), so the type serializes
//! through `String`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An sRGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Canvas particle blue (`#3b82f6`).
    pub const ACCENT_BLUE: Self = Self::rgb(0x3b, 0x82, 0xf6);
    /// Matrix glyph green (`#00ff00`).
    pub const MATRIX_GREEN: Self = Self::rgb(0, 0xff, 0);

    /// Opaque colour.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Colour with explicit alpha (clamped to `[0, 1]`).
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_alpha(a),
        }
    }

    /// Same channels, new alpha.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_alpha(a),
            ..self
        }
    }

    /// Parse a CSS colour: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, or a handful of named colours.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(args) = trimmed
            .strip_prefix("rgba(")
            .or_else(|| trimmed.strip_prefix("rgb("))
        {
            args.strip_suffix(')').and_then(Self::parse_functional)
        } else {
            Self::parse_named(trimmed)
        };
        parsed.ok_or_else(|| ColorParseError(s.to_owned()))
    }

    fn parse_functional(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |i: usize| parts[i].parse::<u8>().ok();
        match parts.len() {
            3 => Some(Self::rgb(channel(0)?, channel(1)?, channel(2)?)),
            4 => Some(Self::rgba(
                channel(0)?,
                channel(1)?,
                channel(2)?,
                parts[3].parse::<f32>().ok()?,
            )),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                f32::from(byte(6)?) / 255.0,
            )),
            _ => None,
        }
    }

    fn parse_named(name: &str) -> Option<Self> {
        let c = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::MATRIX_GREEN,
            "blue" => Self::rgb(0, 0, 255),
            "transparent" => Self::rgba(0, 0, 0, 0.0),
            _ => return None,
        };
        Some(c)
    }

    /// CSS text: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_css()
    }
}

#[inline]
fn clamp_alpha(a: f32) -> f32 {
    if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) }
}

/// A string that is not a recognised CSS colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised colour: {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}
