//! RGBA colors used by profile symbols.

use crate::ElevationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An 8-bit RGBA color.
///
/// Parses from `#rrggbb`, `#rrggbbaa` or the comma separated `r,g,b[,a]`
/// encoding used in persisted symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Lowercase `#rrggbb` name, ignoring alpha.
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Comma separated `r,g,b,a` encoding.
    pub fn encode(&self) -> String {
        format!("{},{},{},{}", self.r, self.g, self.b, self.a)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { component(6)? } else { 255 };
        Some(Self::rgba(component(0)?, component(2)?, component(4)?, a))
    }

    fn parse_components(s: &str) -> Option<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>().ok())
            .collect::<Option<Vec<_>>>()?;
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Some(Self::rgba(*r, *g, *b, *a)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}{:02x}", self.name(), self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ElevationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix('#') {
            Some(hex) => Self::parse_hex(hex),
            None => Self::parse_components(s),
        };
        parsed.ok_or_else(|| ElevationError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ElevationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
