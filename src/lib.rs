//! Image to brick pixel map conversion with a simulated pick-and-place build
//!
//! Images are quantized onto a small brick palette by nearest squared RGB
//! distance. The resulting grid of color codes is previewed, exported as a
//! `pixel_map` list literal, and walked row by row to plan the moves, picks,
//! and placements a building robot would perform.

#![forbid(unsafe_code)]

/// Summary statistics over quantized grids
pub mod analysis;
/// Build planning and actuator execution
pub mod build;
/// Palettes and nearest-color quantization
pub mod color;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Grid storage shared by images and code maps
pub mod spatial;

pub use io::error::{PixelMapError, Result};
