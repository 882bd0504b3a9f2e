//! Per-file stage progress for batch conversions
//!
//! Small batches get one bar per file. Larger batches add an overall bar and
//! reuse the per-file bars as a window over the most recently started files.

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:24} {bar:20.green/white} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█░ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Converted {pos}/{len} images {wide_bar:.green/white}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Stage tracking for one input image
#[derive(Debug, Clone, Default)]
struct FileProgress {
    name: String,
    stage: String,
    step: usize,
    steps: usize,
    done: bool,
}

impl FileProgress {
    fn started(path: &Path, steps: usize) -> Self {
        Self {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            stage: "loading".to_string(),
            step: 0,
            steps,
            done: false,
        }
    }

    const fn is_started(&self) -> bool {
        !self.name.is_empty()
    }

    fn prefix(&self) -> String {
        if self.done {
            format!("✓ {}", self.name)
        } else {
            self.name.clone()
        }
    }

    fn show_on(&self, bar: &ProgressBar) {
        bar.set_length(self.steps as u64);
        bar.set_position(self.step as u64);
        bar.set_prefix(self.prefix());
        bar.set_message(self.stage.clone());
    }
}

/// Coordinates terminal progress for one conversion run
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    files: Vec<FileProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Create the bars for a run of `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        self.files = vec![FileProgress::default(); file_count];

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64).with_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        self.file_bars = (0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                self.multi_progress
                    .add(ProgressBar::new(0).with_style(STAGE_STYLE.clone()))
            })
            .collect();
    }

    /// Number of images in the run
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Start tracking an image that goes through `steps` stages
    ///
    /// Indices past the announced count extend the run.
    pub fn start_file(&mut self, index: usize, path: &Path, steps: usize) {
        if index >= self.files.len() {
            self.files.resize_with(index + 1, FileProgress::default);
        }
        if let Some(file) = self.files.get_mut(index) {
            *file = FileProgress::started(path, steps);
        }
        self.redraw();
    }

    /// Move an image on to its next stage, never past the last step
    pub fn advance(&mut self, index: usize, stage: &str) {
        if let Some(file) = self.files.get_mut(index) {
            stage.clone_into(&mut file.stage);
            file.step = (file.step + 1).min(file.steps);
        }
        self.redraw();
    }

    /// Mark an image as finished
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(file) = self.files.get_mut(index) {
            file.step = file.steps;
            file.stage = format!("done in {:.2}s", elapsed.as_secs_f64());
            file.done = true;
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        self.redraw();
    }

    /// Steps completed and total steps of an image
    pub fn file_steps(&self, index: usize) -> Option<(usize, usize)> {
        self.files
            .get(index)
            .filter(|file| file.is_started())
            .map(|file| (file.step, file.steps))
    }

    /// Current stage label of an image
    pub fn file_stage(&self, index: usize) -> Option<&str> {
        self.files
            .get(index)
            .filter(|file| file.is_started())
            .map(|file| file.stage.as_str())
    }

    /// Run a closure with the bars hidden so it can write to the terminal
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi_progress.suspend(f)
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish();
        }
        let _ = self.multi_progress.clear();
    }

    // Bars show the most recently started files, oldest at the top
    fn redraw(&self) {
        let started: Vec<&FileProgress> = self.files.iter().filter(|f| f.is_started()).collect();
        let window = started
            .get(started.len().saturating_sub(self.file_bars.len())..)
            .unwrap_or_default();

        for (slot, bar) in self.file_bars.iter().enumerate() {
            match window.get(slot) {
                Some(file) => file.show_on(bar),
                None => {
                    bar.set_length(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
