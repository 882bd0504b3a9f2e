//! Error types for pixel map conversion, build planning, and file output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pixel map operations
#[derive(Debug)]
pub enum PixelMapError {
    /// Color code has no entry in the palette
    UnknownColorCode {
        /// The code that failed to resolve
        code: String,
    },

    /// Bin layout has no staging coordinate for its default key
    MissingDefaultBin {
        /// The designated default bin key
        key: String,
    },

    /// Grid rows have unequal lengths
    DimensionMismatch {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },

    /// Palette definition is unusable
    ///
    /// Occurs when the palette:
    /// - Has no entries
    /// - Declares the same code twice
    InvalidPalette {
        /// Description of what's wrong with the palette
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No input image was given and none could be discovered
    NoInputImage {
        /// Directory that was searched
        searched: PathBuf,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Palette configuration file could not be parsed
    PaletteFile {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for PixelMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColorCode { code } => {
                write!(f, "Unknown color code '{code}'")
            }
            Self::MissingDefaultBin { key } => {
                write!(f, "Bin layout has no staging coordinate for default bin '{key}'")
            }
            Self::DimensionMismatch {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Grid row {row} has {found} cells but the first row has {expected}"
                )
            }
            Self::InvalidPalette { reason } => {
                write!(f, "Invalid palette: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoInputImage { searched } => {
                write!(
                    f,
                    "No images found in '{}' and no fallback image; pass a path as the first argument",
                    searched.display()
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::PaletteFile { path, source } => {
                write!(
                    f,
                    "Failed to parse palette file '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PixelMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::PaletteFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pixel map results
pub type Result<T> = std::result::Result<T, PixelMapError>;

impl From<std::io::Error> for PixelMapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PixelMapError {
    PixelMapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an unknown color code error
pub fn unknown_color_code(code: &impl ToString) -> PixelMapError {
    PixelMapError::UnknownColorCode {
        code: code.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> PixelMapError {
    let path = path.into();
    move |source| PixelMapError::FileSystem {
        path,
        operation,
        source,
    }
}
