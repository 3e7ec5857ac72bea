//! Error types for reconstruction and file handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reconstruction operations
#[derive(Debug)]
pub enum UnshredError {
    /// Source file could not be decoded as an image
    InvalidImage {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Two pixel columns cannot be compared
    ///
    /// Occurs when the columns differ in height or are shorter than
    /// three rows, leaving no interior row to classify.
    DimensionMismatch {
        /// Height of the subject column
        subject: usize,
        /// Height of the candidate column
        candidate: usize,
    },

    /// Width estimation found no usable seam spacing
    InsufficientSignal {
        /// Number of adjacent column pairs that were scored
        column_pairs: usize,
        /// Number of pairs that passed the outlier threshold
        candidates: usize,
    },

    /// Column or region lies outside the source raster
    OutOfBounds {
        /// What was being accessed
        operation: &'static str,
        /// Requested extent as (x, y, width, height)
        requested: (usize, usize, usize, usize),
        /// Raster dimensions as (width, height)
        available: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Some files of a batch could not be reconstructed
    BatchIncomplete {
        /// Number of files that failed
        failed: usize,
        /// Number of files attempted
        total: usize,
    },
}

impl fmt::Display for UnshredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::DimensionMismatch { subject, candidate } => {
                write!(
                    f,
                    "Cannot compare columns of height {subject} and {candidate} (need equal heights of at least 3)"
                )
            }
            Self::InsufficientSignal {
                column_pairs,
                candidates,
            } => {
                write!(
                    f,
                    "No stripe width found: {candidates} seam candidates among {column_pairs} column pairs"
                )
            }
            Self::OutOfBounds {
                operation,
                requested,
                available,
            } => {
                let (x, y, w, h) = requested;
                write!(
                    f,
                    "{operation} at ({x}, {y}) size {w}x{h} exceeds raster {}x{}",
                    available.0, available.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::BatchIncomplete { failed, total } => {
                write!(f, "{failed} of {total} files could not be reconstructed")
            }
        }
    }
}

impl std::error::Error for UnshredError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reconstruction results
pub type Result<T> = std::result::Result<T, UnshredError>;

impl From<image::ImageError> for UnshredError {
    fn from(err: image::ImageError) -> Self {
        Self::InvalidImage {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for UnshredError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> UnshredError {
    UnshredError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl UnshredError {
    /// Whether the error concerns the image content rather than the environment
    ///
    /// Batch processing uses this to tell unreadable or signal-free inputs
    /// apart from disk failures when summarising a run.
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidImage { .. }
                | Self::DimensionMismatch { .. }
                | Self::InsufficientSignal { .. }
        )
    }
}
