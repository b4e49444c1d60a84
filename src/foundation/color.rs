use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{AdmatError, AdmatResult};

/// Straight-alpha RGBA color. Serializes as a CSS-style hex string
/// (`#rrggbb`, or `#rrggbbaa` when alpha is not opaque).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(s: &str) -> AdmatResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        // Length checks below count bytes; reject multi-byte characters up
        // front so the pair slices stay on char boundaries.
        if !hex.is_ascii() {
            return Err(AdmatError::validation(format!("invalid hex color '{s}'")));
        }
        let parse_pair = |i: usize| -> AdmatResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| AdmatError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::rgb(parse_pair(0)?, parse_pair(2)?, parse_pair(4)?)),
            8 => Ok(Self::rgba(
                parse_pair(0)?,
                parse_pair(2)?,
                parse_pair(4)?,
                parse_pair(6)?,
            )),
            _ => Err(AdmatError::validation(format!(
                "hex color '{s}' must be #rrggbb or #rrggbbaa"
            ))),
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Rgba8 {
    type Err = AdmatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
