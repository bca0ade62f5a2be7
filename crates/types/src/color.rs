//! Color type used by swatch-style controls.
//!
//! Colors travel through property bags as `#rrggbb` strings; this module
//! owns the parse/format pair and the documented default swatch color.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default swatch color when the host supplies none: green.
pub const DEFAULT_SWATCH: &str = "#008000";

/// Failure to interpret a property value as a color.
#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("color must be in #rrggbb form, got {0:?}")]
    Malformed(String),
}

/// RGB color, stored as 8-bit channels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::Malformed(s.to_string()))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Malformed(s.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
            _ => Err(ColorParseError::Malformed(s.to_string())),
        }
    }

    /// Render as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        // Matches DEFAULT_SWATCH
        Self::new(0x00, 0x80, 0x00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#112233").unwrap();
        assert_eq!(c, Color::new(0x11, 0x22, 0x33));
        assert_eq!(c.to_hex(), "#112233");
    }

    #[test]
    fn test_default_matches_swatch_constant() {
        assert_eq!(Color::default().to_hex(), DEFAULT_SWATCH);
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(Color::from_hex("112233").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#12345g").is_err());
        assert!(Color::from_hex("").is_err());
    }
}
