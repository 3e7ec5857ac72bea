//! Reconstruction of images whose columns were cut into equal-width stripes and shuffled
//!
//! The stripe width is inferred from how seam-like each pair of adjacent
//! columns looks, then the stripes are ordered greedily from both ends so
//! that every new seam is as smooth as possible.

#![deny(unsafe_code)]

/// Edge-likelihood metric, width estimation and stripe assembly
pub mod algorithm;
/// Statistics over seam scores and spacings
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Rasters, pixel columns and stripes
pub mod spatial;

pub use algorithm::executor::{Reconstruction, reconstruct};
pub use io::error::{Result, UnshredError};
