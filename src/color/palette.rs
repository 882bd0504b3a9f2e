//! Brick color palette: color codes, their RGB values, and display glyphs

use crate::io::error::{PixelMapError, Result, unknown_color_code};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// RGB pixel with signed channels
///
/// Loaded images always produce channels in 0..=255, but quantization accepts
/// any value and compares distances arithmetically.
pub type Pixel = [i32; 3];

/// Identifier for one palette entry or a free-text color name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ColorCode(String);

impl ColorCode {
    /// Create a color code from any string-like value
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<char> for ColorCode {
    fn from(code: char) -> Self {
        Self(code.to_string())
    }
}

impl AsRef<str> for ColorCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single palette color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Unique identifier
    pub code: ColorCode,
    /// Display RGB value
    pub rgb: [u8; 3],
    /// Symbol used for console previews
    pub glyph: String,
}

impl PaletteEntry {
    /// Create a palette entry
    pub fn new(code: impl Into<ColorCode>, rgb: [u8; 3], glyph: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            rgb,
            glyph: glyph.into(),
        }
    }

    /// RGB value widened to signed pixel channels
    pub fn pixel(&self) -> Pixel {
        [
            i32::from(self.rgb[0]),
            i32::from(self.rgb[1]),
            i32::from(self.rgb[2]),
        ]
    }
}

/// Ordered, non-empty set of palette entries with unique codes
///
/// Declaration order is significant: quantization ties resolve to the entry
/// declared first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from entries in declaration order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No entries are given
    /// - Two entries share a code
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(PixelMapError::InvalidPalette {
                reason: "palette has no colors".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(&entry.code) {
                return Err(PixelMapError::InvalidPalette {
                    reason: format!("color code '{}' is declared more than once", entry.code),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The six standard brick colors
    pub fn reference() -> Self {
        Self {
            entries: vec![
                PaletteEntry::new('R', [180, 0, 0], "🟥"),
                PaletteEntry::new('U', [0, 70, 170], "🟦"),
                PaletteEntry::new('Y', [255, 205, 0], "🟨"),
                PaletteEntry::new('G', [0, 130, 0], "🟩"),
                PaletteEntry::new('W', [255, 255, 255], "⬜"),
                PaletteEntry::new('B', [0, 0, 0], "⬛"),
            ],
        }
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// First entry and the remainder, in declaration order
    pub fn split_first(&self) -> (&PaletteEntry, &[PaletteEntry]) {
        match self.entries.split_first() {
            Some(split) => split,
            // Palette::new rejects empty entry lists
            None => unreachable!("palette is never empty"),
        }
    }

    /// Number of colors
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette has no colors, never true once validated
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by code
    pub fn entry(&self, code: &ColorCode) -> Option<&PaletteEntry> {
        self.entries.iter().find(|entry| &entry.code == code)
    }

    /// Check if a code belongs to this palette
    pub fn contains(&self, code: &ColorCode) -> bool {
        self.entry(code).is_some()
    }

    /// RGB value for a code
    ///
    /// # Errors
    ///
    /// Returns `UnknownColorCode` if the code is not in the palette
    pub fn color_rgb(&self, code: &ColorCode) -> Result<[u8; 3]> {
        self.entry(code)
            .map(|entry| entry.rgb)
            .ok_or_else(|| unknown_color_code(code))
    }

    /// Display glyph for a code
    ///
    /// # Errors
    ///
    /// Returns `UnknownColorCode` if the code is not in the palette
    pub fn code_glyph(&self, code: &ColorCode) -> Result<&str> {
        self.entry(code)
            .map(|entry| entry.glyph.as_str())
            .ok_or_else(|| unknown_color_code(code))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::reference()
    }
}
