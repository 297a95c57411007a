//! Bead colors.
//!
//! A color is an opaque RGB triple with exactly one serialized form: `#RRGGBB`
//! in uppercase hex. Equality is plain value equality on the triple, so two
//! spellings of the same color (`#ff0000`, `rgb(255, 0, 0)`) compare equal
//! once parsed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cell on the board: `None` is an empty peg.
pub type Cell = Option<BeadColor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BeadColor {
    r: u8,
    g: u8,
    b: u8,
}

impl BeadColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `#RGB` or `rgb(r, g, b)` (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let s = input.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| ColorError::Invalid(input.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_rgb_fn(body).ok_or_else(|| ColorError::Invalid(input.to_string()));
        }

        Err(ColorError::Invalid(input.to_string()))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                // #abc is shorthand for #aabbcc
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                Some(Self {
                    r: nibble(0)? * 17,
                    g: nibble(1)? * 17,
                    b: nibble(2)? * 17,
                })
            }
            _ => None,
        }
    }

    fn parse_rgb_fn(body: &str) -> Option<Self> {
        let mut parts = body.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { r, g, b })
    }

    /// Canonical `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for BeadColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for BeadColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BeadColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BeadColor> for String {
    fn from(color: BeadColor) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color '{0}' (expected #RRGGBB, #RGB or rgb(r, g, b))")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        let upper = BeadColor::parse("#E60013").unwrap();
        let lower = BeadColor::parse("#e60013").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower.to_hex(), "#E60013");
    }

    #[test]
    fn test_rgb_function_normalizes_to_hex() {
        let color = BeadColor::parse("rgb(11, 143, 230)").unwrap();
        assert_eq!(color.to_hex(), "#0B8FE6");
        assert_eq!(color, BeadColor::parse("#0B8FE6").unwrap());
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(BeadColor::parse("#fff").unwrap(), BeadColor::rgb(255, 255, 255));
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "red", "#12345", "#GGGGGG", "rgb(1,2)", "rgb(1,2,3,4)", "rgb(256,0,0)"] {
            assert!(BeadColor::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_serializes_as_canonical_string() {
        let color = BeadColor::parse("#ffd700").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#FFD700\"");

        let cell: Cell = serde_json::from_str("null").unwrap();
        assert_eq!(cell, None);
        assert!(serde_json::from_str::<BeadColor>("\"blue\"").is_err());
    }
}
