//! Color usage counts for quantized grids

use std::collections::HashMap;
use std::io::Write;

use crate::color::{ColorCode, Palette};
use crate::io::error::Result;
use crate::spatial::Grid;

/// Brick count per color code, most used first
///
/// Codes with equal counts keep the order in which they first appear in a
/// row-major scan of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorUsage {
    counts: Vec<(ColorCode, usize)>,
}

impl ColorUsage {
    /// Count every code in a grid
    pub fn from_grid(grid: &Grid<ColorCode>) -> Self {
        let mut slots: HashMap<&ColorCode, usize> = HashMap::new();
        let mut counts: Vec<(ColorCode, usize)> = Vec::new();

        for (_, code) in grid.cells() {
            if let Some(&slot) = slots.get(code) {
                if let Some((_, count)) = counts.get_mut(slot) {
                    *count += 1;
                }
            } else {
                slots.insert(code, counts.len());
                counts.push((code.clone(), 1));
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self { counts }
    }

    /// Counts in reporting order
    pub fn counts(&self) -> &[(ColorCode, usize)] {
        &self.counts
    }

    /// Count for one code, zero if absent
    pub fn count(&self, code: &ColorCode) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| c == code)
            .map_or(0, |&(_, n)| n)
    }

    /// Total number of cells counted
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, n)| n).sum()
    }

    /// Number of distinct codes
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Write the usage table as CSV with palette RGB and glyph columns
    ///
    /// Codes missing from the palette are written as black with no glyph.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn write_csv<W: Write + ?Sized>(&self, palette: &Palette, writer: &mut W) -> Result<()> {
        writeln!(writer, "code,count,R,G,B,emoji")?;
        for (code, count) in &self.counts {
            let entry = palette.entry(code);
            let [r, g, b] = entry.map_or([0, 0, 0], |e| e.rgb);
            let glyph = entry.map_or("", |e| e.glyph.as_str());
            writeln!(writer, "{code},{count},{r},{g},{b},{glyph}")?;
        }
        Ok(())
    }
}
