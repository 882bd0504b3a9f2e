//! Image loading into pixel grids and blocky PNG preview export

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::color::{ColorCode, Palette, Pixel};
use crate::io::configuration::MAX_SCALE;
use crate::io::error::{PixelMapError, Result, file_system, invalid_parameter};
use crate::spatial::Grid;

/// Open an image as RGB8
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn open_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| PixelMapError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Convert an RGB image into a pixel grid indexed by (x, y)
pub fn rgb_to_grid(img: &RgbImage) -> Grid<Pixel> {
    let (width, height) = img.dimensions();
    let cells = Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        let Rgb([r, g, b]) = *img.get_pixel(col as u32, row as u32);
        [i32::from(r), i32::from(g), i32::from(b)]
    });
    Grid::from_array(cells)
}

/// Load an image as a pixel grid, optionally resized to `size` x `size`
///
/// # Errors
///
/// Returns an error if:
/// - The file at the given path cannot be opened or decoded
/// - `size` is zero
pub fn load_pixels(path: &Path, size: Option<u32>) -> Result<Grid<Pixel>> {
    let img = open_rgb(path)?;

    let img = match size {
        Some(0) => {
            return Err(invalid_parameter(
                "size",
                &0,
                &"resize target must be positive",
            ));
        }
        Some(edge) => imageops::resize(&img, edge, edge, FilterType::CatmullRom),
        None => img,
    };

    log::debug!(
        "Loaded {} as {}x{} pixels",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(rgb_to_grid(&img))
}

/// Check a block scale against the supported range
///
/// # Errors
///
/// Returns `InvalidParameter` if `scale` is zero or exceeds `MAX_SCALE`
pub fn check_scale(scale: u32) -> Result<()> {
    if scale == 0 {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &"block scale must be positive",
        ));
    }
    if scale > MAX_SCALE {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("must not exceed {MAX_SCALE}"),
        ));
    }
    Ok(())
}

/// Edge length of an image after upscaling each pixel to a `scale` block
///
/// # Errors
///
/// Returns `InvalidParameter` if the scaled edge does not fit in a `u32`
pub fn scaled_edge(edge: usize, scale: u32) -> Result<u32> {
    u32::try_from(edge)
        .ok()
        .and_then(|narrow| narrow.checked_mul(scale))
        .ok_or_else(|| {
            invalid_parameter(
                "scale",
                &scale,
                &format!("edge of {edge} pixels is too large to scale"),
            )
        })
}

/// Render a code grid as an image with one `scale` x `scale` block per cell
///
/// Codes missing from the palette render black.
///
/// # Errors
///
/// Returns `InvalidParameter` if `scale` is out of range or the scaled image
/// would not fit in `u32` dimensions
pub fn render_preview(grid: &Grid<ColorCode>, palette: &Palette, scale: u32) -> Result<RgbImage> {
    check_scale(scale)?;
    let width = scaled_edge(grid.cols(), scale)?;
    let height = scaled_edge(grid.rows(), scale)?;
    let mut img = RgbImage::new(width, height);

    // Cell origins stay below the checked edge lengths
    for ((x, y), code) in grid.cells() {
        let color = Rgb(palette.color_rgb(code).unwrap_or([0, 0, 0]));
        let (x0, y0) = (x as u32 * scale, y as u32 * scale);
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x0 + dx, y0 + dy, color);
            }
        }
    }

    Ok(img)
}

/// Save a blocky PNG preview of a code grid
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero
/// - The grid is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(
    grid: &Grid<ColorCode>,
    palette: &Palette,
    scale: u32,
    output_path: &Path,
) -> Result<()> {
    if grid.is_empty() {
        return Err(PixelMapError::InvalidParameter {
            parameter: "grid",
            value: format!("{}x{}", grid.cols(), grid.rows()),
            reason: "cannot render a preview of an empty grid".to_string(),
        });
    }

    let img = render_preview(grid, palette, scale)?;
    save_image(&img, output_path)
}

/// Save any encodable image buffer, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory cannot be created or encoding fails
pub fn save_image<P, C>(img: &image::ImageBuffer<P, C>, output_path: &Path) -> Result<()>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
    C: std::ops::Deref<Target = [P::Subpixel]>,
{
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }

    img.save(output_path)
        .map_err(|e| PixelMapError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
