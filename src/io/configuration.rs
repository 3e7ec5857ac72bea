//! Estimator defaults and runtime configuration constants

// Width estimation defaults
/// Maximum number of adjacent column pairs scored during width estimation
pub const DEFAULT_MAX_COLUMN_PAIRS: usize = 350;

/// Number of standard deviations below the top score that still counts as a seam
pub const DEFAULT_STDDEV_MULTIPLIER: f64 = 1.0;

// Gaps of one column are adjacent detections of the same seam
/// Smallest seam spacing accepted as a stripe width
pub const DEFAULT_MIN_GAP: usize = 2;

/// Perceptual weights applied to red, green and blue differences
pub const INTENSITY_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Shortest column that still has an interior row
pub const MIN_COLUMN_HEIGHT: usize = 3;

// Input discovery
/// Filename ending that marks a shredded input image
pub const SHREDDED_SUFFIX: &str = "shredded.png";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_restored";
/// Suffix added to assembly animation filenames
pub const VISUALIZATION_SUFFIX: &str = "_assembly";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Animation settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 120;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the final frame's delay
pub const FINAL_FRAME_HOLD: u32 = 10;
