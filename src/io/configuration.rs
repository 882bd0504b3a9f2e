//! Runtime defaults and palette configuration files

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::build::{BinLayout, ColorClassifier, Coordinate, FallbackRule};
use crate::color::{ColorCode, Palette, PaletteEntry};
use crate::io::error::{PixelMapError, Result, file_system};

/// Default edge length images are resized to before quantization
pub const DEFAULT_SIZE: u32 = 64;

/// Default block size of each cell in the PNG preview
pub const DEFAULT_SCALE: u32 = 8;

/// Maximum block size of each cell in previews and assets
pub const MAX_SCALE: u32 = 64;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: u32 = 4096;

/// Image extensions accepted as input, in discovery priority order
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Directory searched for an input image when none is given
pub const IMAGES_DIR: &str = "images";

/// Image used when the images directory holds nothing usable
pub const FALLBACK_IMAGE: &str = "image.png";

// Output naming, relative to the input file stem
/// Suffix of the exported pixel map literal
pub const PIXELS_SUFFIX: &str = "_pixels.txt";
/// Suffix of the color usage table
pub const COLORS_USED_SUFFIX: &str = "_colors_used.txt";
/// Suffix of the blocky PNG preview
pub const PREVIEW_SUFFIX: &str = "_preview.png";
/// Suffix of the bit-depth asset directory
pub const ASSETS_SUFFIX: &str = "_assets";

/// Bit depths generated as preview assets
pub const BIT_DEPTH_TARGETS: [u32; 5] = [16, 24, 32, 48, 64];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Number of progress stages per processed file
pub const STAGES_PER_FILE: usize = 6;

/// One palette color in a configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct ColorSpec {
    /// Unique color code
    pub code: ColorCode,
    /// Display RGB value
    pub rgb: [u8; 3],
    /// Console preview symbol
    pub glyph: String,
    /// Staging coordinate of this color's bin
    pub bin: (i32, i32),
}

/// Keyword rule in a configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackSpec {
    /// Substrings matched case-insensitively
    pub keywords: Vec<String>,
    /// Target bin key
    pub bin: ColorCode,
}

/// Palette, bins, and fallback rules loaded from JSON
///
/// ```json
/// {
///   "default_bin": "B",
///   "colors": [{ "code": "B", "rgb": [0, 0, 0], "glyph": "⬛", "bin": [-7, 0] }],
///   "fallback": [{ "keywords": ["red"], "bin": "B" }]
/// }
/// ```
///
/// `fallback` may be omitted, in which case the reference rules apply.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteConfig {
    /// Catch-all bin key
    pub default_bin: ColorCode,
    /// Colors in palette declaration order
    pub colors: Vec<ColorSpec>,
    /// Ordered keyword rules
    #[serde(default)]
    pub fallback: Option<Vec<FallbackSpec>>,
}

/// Fully validated runtime configuration
#[derive(Debug, Clone)]
pub struct BuildProfile {
    /// Palette used for quantization and previews
    pub palette: Palette,
    /// Staging bins used for planning
    pub bins: BinLayout,
    /// Keyword rules for free-text color names
    pub classifier: ColorClassifier,
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self {
            palette: Palette::reference(),
            bins: BinLayout::reference(),
            classifier: ColorClassifier::reference(),
        }
    }
}

impl PaletteConfig {
    /// Parse a configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns `PaletteFile` if the text is not a valid configuration
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PixelMapError::PaletteFile {
            path: origin.to_path_buf(),
            source: e,
        })
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(file_system(path, "read palette"))?;
        Self::from_json_str(&text, path)
    }

    /// Validate into a build profile
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The palette is empty or repeats a code
    /// - The default bin has no color entry
    pub fn into_profile(self) -> Result<BuildProfile> {
        let mut bins = HashMap::with_capacity(self.colors.len());
        let mut entries = Vec::with_capacity(self.colors.len());

        for spec in self.colors {
            bins.insert(spec.code.clone(), Coordinate::from(spec.bin));
            entries.push(PaletteEntry::new(spec.code, spec.rgb, spec.glyph));
        }

        let palette = Palette::new(entries)?;
        let bins = BinLayout::new(bins, self.default_bin)?;
        let classifier = self.fallback.map_or_else(ColorClassifier::reference, |rules| {
            ColorClassifier::new(
                rules
                    .into_iter()
                    .map(|rule| FallbackRule::new(rule.keywords, rule.bin))
                    .collect(),
            )
        });

        Ok(BuildProfile {
            palette,
            bins,
            classifier,
        })
    }
}

impl BuildProfile {
    /// Load a profile from an optional palette file, defaulting to the reference set
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or validated
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let profile = PaletteConfig::from_json_path(path)?.into_profile()?;
                log::info!(
                    "Loaded {} colors from palette file {}",
                    profile.palette.len(),
                    path.display()
                );
                Ok(profile)
            }
            None => Ok(Self::default()),
        }
    }
}
