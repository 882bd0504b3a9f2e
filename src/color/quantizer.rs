//! Nearest-color quantization of pixel grids onto a palette

use crate::color::palette::{ColorCode, Palette, PaletteEntry, Pixel};
use crate::spatial::Grid;

/// Sum of squared per-channel differences
pub fn squared_distance(a: Pixel, b: Pixel) -> i64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i64::from(x) - i64::from(y);
            d * d
        })
        .sum()
}

/// Maps pixels to the closest palette color by squared RGB distance
pub struct Quantizer<'a> {
    palette: &'a Palette,
}

impl<'a> Quantizer<'a> {
    /// Create a quantizer over the given palette
    pub const fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Closest palette entry to a pixel
    ///
    /// Exact distance ties go to the entry declared first.
    pub fn nearest_entry(&self, pixel: Pixel) -> &'a PaletteEntry {
        let (first, rest) = self.palette.split_first();
        let mut best = first;
        let mut best_distance = squared_distance(pixel, first.pixel());

        for entry in rest {
            let distance = squared_distance(pixel, entry.pixel());
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }

        best
    }

    /// Code of the closest palette entry to a pixel
    pub fn nearest(&self, pixel: Pixel) -> &'a ColorCode {
        &self.nearest_entry(pixel).code
    }

    /// Quantize a pixel grid into a grid of palette codes with the same shape
    pub fn quantize(&self, image: &Grid<Pixel>) -> Grid<ColorCode> {
        image.map(|&pixel| self.nearest(pixel).clone())
    }
}
