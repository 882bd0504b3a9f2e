//! Command-line interface for converting images into brick pixel maps

use crate::analysis::statistics::ColorUsage;
use crate::build::{BuildPlanner, VirtualActuator, execute};
use crate::color::Quantizer;
use crate::io::assets::export_bit_depth_assets;
use crate::io::configuration::{
    ASSETS_SUFFIX, BuildProfile, COLORS_USED_SUFFIX, DEFAULT_SCALE, DEFAULT_SIZE, FALLBACK_IMAGE,
    IMAGES_DIR, MAX_GRID_DIMENSION, PIXELS_SUFFIX, PREVIEW_SUFFIX, STAGES_PER_FILE,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{PixelMapError, Result, file_system, invalid_parameter};
use crate::io::export::{export_pixel_map, write_emoji_preview, write_file};
use crate::io::image::{check_scale, export_preview_png, load_pixels};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "brickmap")]
#[command(
    author,
    version,
    about = "Convert an image into a brick pixel map and simulate its build"
)]
/// Command-line arguments for the pixel map converter
pub struct Cli {
    /// Input image or directory (defaults to the first image in ./images, then ./image.png)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Resize the image to SIZE x SIZE before conversion (0 keeps the original resolution)
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Block size of each cell in the saved PNG preview and assets (1 to 64)
    #[arg(short = 'x', long, default_value_t = DEFAULT_SCALE)]
    pub scale: u32,

    /// JSON palette file replacing the standard brick colors and bins
    #[arg(short, long, value_name = "FILE")]
    pub palette: Option<PathBuf>,

    /// Suppress progress, preview, and build log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Skip bit-depth asset generation
    #[arg(short = 'A', long)]
    pub no_assets: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress and console previews should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Resize target, `None` when the original resolution is kept
    pub const fn resize_target(&self) -> Option<u32> {
        if self.size == 0 { None } else { Some(self.size) }
    }

    /// Validate numeric arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the scale is outside 1..=`MAX_SCALE` or the size
    /// exceeds the grid limit
    pub fn validate(&self) -> Result<()> {
        check_scale(self.scale)?;
        if self.size > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "size",
                &self.size,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
        Ok(())
    }
}

/// Check if a path has a supported image extension (case-insensitive)
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Locate an input image when no target is given
///
/// Searches `<root>/images` extension by extension in priority order, taking
/// the alphabetically first match, then falls back to `<root>/image.png`.
///
/// # Errors
///
/// Returns `NoInputImage` if nothing is found
pub fn find_default_input(root: &Path) -> Result<PathBuf> {
    let images_dir = root.join(IMAGES_DIR);

    if images_dir.is_dir() {
        let mut candidates = Vec::new();
        let entries =
            std::fs::read_dir(&images_dir).map_err(file_system(&images_dir, "read directory"))?;
        for entry in entries {
            let path = entry
                .map_err(file_system(&images_dir, "read directory"))?
                .path();
            if path.is_file() {
                candidates.push(path);
            }
        }
        candidates.sort();

        for extension in SUPPORTED_EXTENSIONS {
            let found = candidates.iter().find(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            });
            if let Some(path) = found {
                return Ok(path.clone());
            }
        }
    }

    let fallback = root.join(FALLBACK_IMAGE);
    if fallback.is_file() {
        return Ok(fallback);
    }

    Err(PixelMapError::NoInputImage {
        searched: images_dir,
    })
}

/// Output file next to the input, named after its stem
pub fn sibling_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Orchestrates conversion of one or more images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, palette loading, target
    /// discovery, or file processing fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.validate()?;
        let profile = BuildProfile::load(self.cli.palette.as_deref())?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &profile)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = match &self.cli.target {
            Some(target) => target.clone(),
            None => find_default_input(Path::new("."))?,
        };

        if target.is_file() {
            if is_supported_image(&target) {
                if self.should_process_file(&target) {
                    Ok(vec![target])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"not a supported image type (png, jpg, jpeg, bmp, gif)",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(&target).map_err(file_system(&target, "read directory"))?;
            for entry in entries {
                let path = entry.map_err(file_system(&target, "read directory"))?.path();
                if path.is_file() && is_supported_image(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = sibling_path(input_path, PIXELS_SUFFIX);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn advance(&mut self, index: usize, stage: &str) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, stage);
        }
    }

    // Console output goes through the progress manager so bars are not torn
    fn print_section(&self, write: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
        let print = || {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            let out: &mut dyn Write = &mut handle;
            write(out)
        };
        match &self.progress_manager {
            Some(pm) => pm.suspend(print),
            None => Ok(()),
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        profile: &BuildProfile,
    ) -> Result<()> {
        let start_time = Instant::now();
        log::info!("Using image: {}", input_path.display());

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, STAGES_PER_FILE);
        }

        let pixels = load_pixels(input_path, self.cli.resize_target())?;

        self.advance(index, "quantizing");
        let codes = Quantizer::new(&profile.palette).quantize(&pixels);

        self.print_section(|out| {
            writeln!(out, "\n🖼️ PIXEL PREVIEW")?;
            write_emoji_preview(&codes, &profile.palette, out)
        })?;

        self.advance(index, "counting colors");
        let usage = ColorUsage::from_grid(&codes);
        let colors_path = sibling_path(input_path, COLORS_USED_SUFFIX);
        write_file(&colors_path, |writer| usage.write_csv(&profile.palette, writer))?;
        log::info!("Saved color usage to {}", colors_path.display());

        self.advance(index, "rendering preview");
        let preview_path = sibling_path(input_path, PREVIEW_SUFFIX);
        export_preview_png(&codes, &profile.palette, self.cli.scale, &preview_path)?;
        log::info!(
            "Saved blocky preview to {} (size {}x{} scaled x{})",
            preview_path.display(),
            codes.cols(),
            codes.rows(),
            self.cli.scale
        );

        self.advance(index, "generating assets");
        if !self.cli.no_assets {
            let assets_dir = sibling_path(input_path, ASSETS_SUFFIX);
            log::info!("Generating bit-depth assets into {}", assets_dir.display());
            export_bit_depth_assets(
                input_path,
                self.cli.resize_target(),
                self.cli.scale,
                &assets_dir,
            )?;
        }

        self.advance(index, "simulating build");
        let planner = BuildPlanner::new(&profile.bins, &profile.classifier);
        let actions = planner.plan(&codes);
        let mut actuator = VirtualActuator::new();
        execute(&mut actuator, &actions)?;
        log::info!(
            "Simulated build of {} bricks ({} actions)",
            usage.total(),
            actions.len()
        );

        self.print_section(|out| {
            writeln!(out, "\n🤖 VIRTUAL BUILD")?;
            actuator.write_log(out)
        })?;

        self.advance(index, "exporting");
        let pixels_path = sibling_path(input_path, PIXELS_SUFFIX);
        export_pixel_map(&codes, &pixels_path)?;
        log::info!("Exported pixel map to {}", pixels_path.display());

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }
}
