//! Command-line interface for batch reconstruction of shredded PNG files

use crate::algorithm::estimator::EstimatorConfig;
use crate::algorithm::executor::reconstruct;
use crate::io::configuration::{
    DEFAULT_MAX_COLUMN_PAIRS, DEFAULT_MIN_GAP, DEFAULT_STDDEV_MULTIPLIER, GIF_FRAME_DELAY_MS,
    OUTPUT_SUFFIX, SHREDDED_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, UnshredError};
use crate::io::image::{load_raster, save_raster};
use crate::io::progress::{FileStage, ProgressManager};
use crate::io::visualization::AssemblyAnimation;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "unshred")]
#[command(
    author,
    version,
    about = "Reassemble images whose columns were cut into stripes and shuffled"
)]
/// Command-line arguments for the reconstruction tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Shredded PNG file, or directory searched for files ending in "shredded.png"
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of adjacent column pairs scored when estimating the stripe width
    #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_COLUMN_PAIRS)]
    pub max_column_pairs: usize,

    /// Standard deviations below the top score still counted as a seam
    #[arg(short = 's', long, default_value_t = DEFAULT_STDDEV_MULTIPLIER)]
    pub stddev_multiplier: f64,

    /// Smallest seam spacing accepted as a stripe width
    #[arg(short = 'g', long, default_value_t = DEFAULT_MIN_GAP)]
    pub min_gap: usize,

    /// Write an animated GIF of the assembly next to each result
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Estimator parameters selected on the command line
    pub const fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig {
            max_column_pairs: self.max_column_pairs,
            stddev_multiplier: self.stddev_multiplier,
            min_gap: self.min_gap,
        }
    }
}

/// A file that could not be reconstructed
#[derive(Debug)]
pub struct FileFailure {
    /// Input file
    pub path: PathBuf,
    /// Why processing stopped
    pub error: UnshredError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Files reconstructed and saved
    pub succeeded: Vec<PathBuf>,
    /// Files that failed, in processing order
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    /// Number of failures caused by the images themselves
    pub fn input_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.error.is_input_error())
            .count()
    }

    /// Turn the summary into an error if any file failed
    ///
    /// # Errors
    ///
    /// Returns `BatchIncomplete` when at least one file failed
    pub fn into_result(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(UnshredError::BatchIncomplete {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Orchestrates batch processing of shredded files with progress tracking
///
/// Each file is reconstructed independently; a failure is recorded and the
/// batch moves on to the next file.
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
    /// Returns an error if the estimator parameters are invalid or the
    /// target cannot be read; failures of individual files are reported in
    /// the summary instead
    pub fn process(&mut self) -> Result<BatchSummary> {
        self.cli.estimator_config().validate()?;
        let files = self.collect_files()?;
        let mut summary = BatchSummary::default();

        if files.is_empty() {
            return Ok(summary);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.into_iter().enumerate() {
            match self.process_file(&file, index) {
                Ok(()) => summary.succeeded.push(file),
                Err(error) => {
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.fail_file(index);
                    }
                    // Allow print for per-file failure reports
                    #[allow(clippy::print_stderr)]
                    if !self.cli.quiet {
                        eprintln!("Failed: {} ({error})", file.display());
                    }
                    summary.failures.push(FileFailure { path: file, error });
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    /// Inputs selected by the target argument, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a readable
    /// directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| UnshredError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if Self::is_shredded_name(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn is_shredded_name(path: &Path) -> bool {
        path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(SHREDDED_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.estimator_config();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let raster = load_raster(input_path)?;

        self.set_stage(index, FileStage::Reconstructing);
        let mut reconstruction = reconstruct(&raster, &config)?;
        let restored = reconstruction.render()?;

        self.set_stage(index, FileStage::Saving);
        save_raster(&restored, &Self::get_output_path(input_path))?;

        if self.cli.visualize {
            let animation = AssemblyAnimation::new(
                &restored,
                reconstruction.assembly(),
                reconstruction.stripe_width(),
            )?;
            animation.export_gif(
                &Self::get_visualization_path(input_path),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn set_stage(&mut self, index: usize, stage: FileStage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.set_stage(index, stage);
        }
    }

    /// Path of the reconstructed image for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Path of the assembly animation for `input_path`
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, VISUALIZATION_SUFFIX, "gif")
    }

    fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}
