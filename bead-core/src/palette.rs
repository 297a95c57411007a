//! The selectable bead colors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BeadColor;

/// The stock 24-color bead set, in display order.
const CLASSIC: [BeadColor; 24] = [
    BeadColor::rgb(0xFF, 0xFF, 0xFF), // White
    BeadColor::rgb(0x00, 0x00, 0x00), // Black
    BeadColor::rgb(0xE6, 0x00, 0x13), // Red
    BeadColor::rgb(0xF9, 0xB2, 0x31), // Orange-yellow
    BeadColor::rgb(0x0B, 0x8F, 0xE6), // Blue
    BeadColor::rgb(0x1C, 0xAC, 0x78), // Green
    BeadColor::rgb(0xFF, 0x7F, 0x00), // Orange
    BeadColor::rgb(0x8B, 0x1C, 0x8E), // Purple
    BeadColor::rgb(0xFF, 0xB3, 0xD7), // Pink
    BeadColor::rgb(0xDA, 0x2A, 0x39), // Cherry
    BeadColor::rgb(0x2B, 0x36, 0x94), // Dark blue
    BeadColor::rgb(0x0D, 0x85, 0x52), // Dark green
    BeadColor::rgb(0xFF, 0xCC, 0xD2), // Light pink
    BeadColor::rgb(0xB7, 0xE3, 0xF6), // Light blue
    BeadColor::rgb(0xC7, 0xE5, 0xD0), // Mint
    BeadColor::rgb(0xFF, 0xF3, 0xAA), // Pastel yellow
    BeadColor::rgb(0xA8, 0x7C, 0x5D), // Light brown
    BeadColor::rgb(0x6B, 0x3F, 0x2A), // Brown
    BeadColor::rgb(0x8B, 0x86, 0x80), // Gray
    BeadColor::rgb(0xD3, 0xD3, 0xD3), // Light gray
    BeadColor::rgb(0xFF, 0x69, 0xB4), // Hot pink
    BeadColor::rgb(0x4E, 0xCD, 0xC4), // Turquoise
    BeadColor::rgb(0xFF, 0xD7, 0x00), // Gold
    BeadColor::rgb(0xC0, 0xC0, 0xC0), // Silver
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<BeadColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

impl Palette {
    pub fn classic() -> Self {
        Self {
            colors: CLASSIC.to_vec(),
        }
    }

    pub fn new(colors: Vec<BeadColor>) -> Result<Self, PaletteError> {
        let palette = Self { colors };
        palette.validate()?;
        Ok(palette)
    }

    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.colors.is_empty() {
            tracing::error!("palette has no colors defined");
            return Err(PaletteError::Empty);
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<BeadColor> {
        self.colors.get(index).copied()
    }

    /// The color selected at startup.
    pub fn default_color(&self) -> BeadColor {
        self.colors.first().copied().unwrap_or(CLASSIC[0])
    }

    pub fn index_of(&self, color: BeadColor) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
}
