//! Colors and stroke styles shared by element kinds.

use crate::error::{EngineError, EngineResult};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serializable color representation (RGBA8).
///
/// Serializes as a CSS hex string (`#rrggbb`, or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Default fill for new shapes (`#3b82f6`).
    pub const fn accent() -> Self {
        Self::rgb(0x3b, 0x82, 0xf6)
    }
}

impl FromStr for SerializableColor {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidColor(s.to_string());
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }
        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        // #rgb expands each nibble
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_string()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke style for shape outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Dash pattern (dash, gap) handed to the renderer; `None` for solid strokes.
    pub fn dash_pattern(self) -> Option<[f64; 2]> {
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dashed => Some([10.0, 5.0]),
            StrokeStyle::Dotted => Some([2.0, 2.0]),
        }
    }
}
