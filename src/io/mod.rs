//! Input/output layer around the reconstruction core

/// Command-line interface and batch processing
pub mod cli;
/// Default parameters and output naming constants
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and saving
pub mod image;
/// Progress display for batch runs
pub mod progress;
/// Assembly animation export
pub mod visualization;
