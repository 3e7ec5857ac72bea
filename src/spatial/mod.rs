//! Spatial data structures for shredded images
//!
//! This module contains:
//! - The in-memory raster and its column/region access
//! - Pixel columns
//! - Stripes and the stripe set that owns their caches
//! - Shredding of rasters for test inputs

/// Pixel columns sampled from a raster
pub mod column;
/// In-memory RGB raster
pub mod raster;
/// Cutting rasters into shuffled stripes
pub mod shred;
/// Stripes and stripe sets
pub mod stripes;

pub use raster::Raster;
pub use stripes::{Stripe, StripeSet};
