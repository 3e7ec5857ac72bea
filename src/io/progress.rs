//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Processing stage of a single file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileStage {
    /// Not started yet
    Queued,
    /// Decoding the source image
    Loading,
    /// Estimating the stripe width and ordering stripes
    Reconstructing,
    /// Writing the outputs
    Saving,
    /// Finished successfully
    Done,
    /// Aborted with an error
    Failed,
}

impl FileStage {
    /// Bar position for this stage out of [`FileStage::STEPS`]
    pub const fn position(self) -> u64 {
        match self {
            Self::Queued => 0,
            Self::Loading => 1,
            Self::Reconstructing => 2,
            Self::Saving => 3,
            Self::Done | Self::Failed => Self::STEPS,
        }
    }

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Loading => "loading",
            Self::Reconstructing => "reconstructing",
            Self::Saving => "saving",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Number of bar steps per file
    pub const STEPS: u64 = 4;
}

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a rolling window plus a batch bar (for large batches) based on file count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    /// Stores (`filename`, `stage`) for rolling window display
    file_states: Vec<(String, FileStage)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(FileStage::STEPS);
            pb.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced by [`ProgressManager::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Register a new file and show it as loading
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states
                .resize(index + 1, (String::new(), FileStage::Queued));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, FileStage::Loading);
        }
        self.update_bars();
    }

    /// Move a file to another stage
    pub fn set_stage(&mut self, index: usize, stage: FileStage) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.1 = stage;
        }
        self.update_bars();
    }

    /// Stage currently shown for a file
    pub fn stage(&self, index: usize) -> Option<FileStage> {
        self.file_states.get(index).map(|(_, stage)| *stage)
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        let detail = format!("({:.2}s)", elapsed.as_secs_f64());
        self.finish_file(index, FileStage::Done, "✓", &detail);
    }

    /// Mark file as failed and update batch progress
    pub fn fail_file(&mut self, index: usize) {
        self.finish_file(index, FileStage::Failed, "✗", "");
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn finish_file(&mut self, index: usize, stage: FileStage, marker: &str, detail: &str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("{marker} {} {detail}", state.0).trim_end().to_string();
            state.1 = stage;
        }
        self.update_bars();
    }

    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active_files: Vec<&(String, FileStage)> = self
            .file_states
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, bar) in self.file_bars.iter().enumerate() {
            if let Some((name, stage)) = visible_files.get(bar_idx).copied() {
                bar.set_message(name.clone());
                bar.set_position(stage.position());
                bar.set_prefix(stage.label());
            } else {
                bar.set_message("");
                bar.set_position(0);
                bar.set_prefix("");
            }
        }
    }
}
