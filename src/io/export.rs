//! Text exports of quantized grids: emoji preview and pixel map literal

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::color::{ColorCode, Palette};
use crate::io::error::{Result, file_system};
use crate::spatial::Grid;

/// Quote a code as a single-quoted list literal element
pub fn quote_code(code: &ColorCode) -> String {
    let mut quoted = String::with_capacity(code.as_str().len() + 2);
    quoted.push('\'');
    for ch in code.as_str().chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

/// Write the grid as a `pixel_map = [...]` list literal, one row per line
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_pixel_map_literal<W: Write + ?Sized>(
    grid: &Grid<ColorCode>,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "pixel_map = [")?;
    for row in grid.row_views() {
        let cells: Vec<String> = row.iter().map(quote_code).collect();
        writeln!(writer, " [{}],", cells.join(", "))?;
    }
    writeln!(writer, "]")?;
    Ok(())
}

/// Write the grid as emoji rows using the palette glyphs
///
/// # Errors
///
/// Returns an error if:
/// - A code is not in the palette
/// - The writer fails
pub fn write_emoji_preview<W: Write + ?Sized>(
    grid: &Grid<ColorCode>,
    palette: &Palette,
    writer: &mut W,
) -> Result<()> {
    for row in grid.row_views() {
        let glyphs = row
            .iter()
            .map(|code| palette.code_glyph(code))
            .collect::<Result<Vec<_>>>()?;
        writeln!(writer, "{}", glyphs.join(" "))?;
    }
    Ok(())
}

/// Create a file and hand a buffered writer to `write`, flushing at the end
///
/// # Errors
///
/// Returns an error if the file cannot be created, written, or flushed
pub fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }

    let file = File::create(path).map_err(file_system(path, "create file"))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(file_system(path, "write file"))?;
    Ok(())
}

/// Save the pixel map literal to a file
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn export_pixel_map(grid: &Grid<ColorCode>, path: &Path) -> Result<()> {
    write_file(path, |writer| write_pixel_map_literal(grid, writer))
}
