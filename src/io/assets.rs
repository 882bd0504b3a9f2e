//! Bit-depth asset generation for downstream displays and game textures
//!
//! Each asset is the source image resized with nearest-neighbour sampling,
//! reduced or widened to the target bit depth, then upscaled by the preview
//! scale. A failing target is logged and skipped.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, RgbImage, Rgba};

use crate::io::configuration::BIT_DEPTH_TARGETS;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{check_scale, open_rgb, save_image, scaled_edge};

/// Reduce a channel triple to RGB565 and expand it back to 8 bits per channel
pub const fn rgb565_round_trip([r, g, b]: [u8; 3]) -> [u8; 3] {
    let r5 = r >> 3;
    let g6 = g >> 2;
    let b5 = b >> 3;
    [(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2)]
}

/// Widen an 8-bit channel to 16 bits so 255 maps to 65535
pub const fn widen_channel(value: u8) -> u16 {
    value as u16 * 257
}

/// File name of the asset generated for a bit depth
pub fn asset_file_name(bits: u32) -> Option<&'static str> {
    match bits {
        16 => Some("asset_16bit_rgb565.png"),
        24 => Some("asset_24bit_rgb888.png"),
        32 => Some("asset_32bit_rgba8888.png"),
        48 => Some("asset_48bit_rgb16.png"),
        64 => Some("asset_64bit_rgba16.png"),
        _ => None,
    }
}

/// Write the asset for one bit depth into `out_dir`
///
/// # Errors
///
/// Returns an error if:
/// - The bit depth is unsupported
/// - `scale` is out of range or the scaled image is too large
/// - The file cannot be saved
pub fn export_bit_depth_asset(
    base: &RgbImage,
    bits: u32,
    scale: u32,
    out_dir: &Path,
) -> Result<PathBuf> {
    let name = asset_file_name(bits)
        .ok_or_else(|| invalid_parameter("bits", &bits, &"no asset format for this depth"))?;
    check_scale(scale)?;
    let width = scaled_edge(base.width() as usize, scale)?;
    let height = scaled_edge(base.height() as usize, scale)?;
    let out_path = out_dir.join(name);

    match bits {
        16 => {
            let reduced = RgbImage::from_fn(base.width(), base.height(), |x, y| {
                Rgb(rgb565_round_trip(base.get_pixel(x, y).0))
            });
            save_image(
                &imageops::resize(&reduced, width, height, FilterType::Nearest),
                &out_path,
            )?;
        }
        24 => {
            save_image(
                &imageops::resize(base, width, height, FilterType::Nearest),
                &out_path,
            )?;
        }
        32 => {
            let rgba = image::DynamicImage::ImageRgb8(base.clone()).to_rgba8();
            save_image(
                &imageops::resize(&rgba, width, height, FilterType::Nearest),
                &out_path,
            )?;
        }
        48 => {
            let wide: ImageBuffer<Rgb<u16>, Vec<u16>> =
                ImageBuffer::from_fn(base.width(), base.height(), |x, y| {
                    Rgb(base.get_pixel(x, y).0.map(widen_channel))
                });
            save_image(
                &imageops::resize(&wide, width, height, FilterType::Nearest),
                &out_path,
            )?;
        }
        _ => {
            let wide: ImageBuffer<Rgba<u16>, Vec<u16>> =
                ImageBuffer::from_fn(base.width(), base.height(), |x, y| {
                    let [r, g, b] = base.get_pixel(x, y).0.map(widen_channel);
                    Rgba([r, g, b, u16::MAX])
                });
            save_image(
                &imageops::resize(&wide, width, height, FilterType::Nearest),
                &out_path,
            )?;
        }
    }

    Ok(out_path)
}

/// Generate every bit-depth asset for a source image
///
/// The source is resized to `size` x `size` first, or kept at its own
/// resolution when `size` is `None`. Returns the paths that were written.
/// Targets that fail are logged and skipped.
///
/// # Errors
///
/// Returns an error if:
/// - `size` is zero
/// - `scale` is out of range or the scaled assets would be too large
/// - The source image cannot be loaded
pub fn export_bit_depth_assets(
    source_path: &Path,
    size: Option<u32>,
    scale: u32,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    if size == Some(0) {
        return Err(invalid_parameter("size", &0, &"asset size must be positive"));
    }
    check_scale(scale)?;

    let source = open_rgb(source_path)?;
    let base = match size {
        Some(edge) => imageops::resize(&source, edge, edge, FilterType::Nearest),
        None => source,
    };
    scaled_edge(base.width() as usize, scale)?;
    scaled_edge(base.height() as usize, scale)?;

    let mut written = Vec::with_capacity(BIT_DEPTH_TARGETS.len());
    for bits in BIT_DEPTH_TARGETS {
        match export_bit_depth_asset(&base, bits, scale, out_dir) {
            Ok(path) => {
                log::info!("Created asset for {bits}-bit: {}", path.display());
                written.push(path);
            }
            Err(e) => log::warn!("Failed to create {bits}-bit asset: {e}"),
        }
    }

    Ok(written)
}
