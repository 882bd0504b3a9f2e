//! Palette definitions and nearest-color quantization

/// Color codes, palette entries, and the reference brick palette
pub mod palette;
/// Nearest squared-distance matching of pixels to palette colors
pub mod quantizer;

pub use palette::{ColorCode, Palette, PaletteEntry, Pixel};
pub use quantizer::Quantizer;
