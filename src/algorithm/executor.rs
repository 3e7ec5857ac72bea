use crate::algorithm::assembly::{Assembly, assemble};
use crate::algorithm::cache::CacheStats;
use crate::algorithm::estimator::{EstimatorConfig, WidthEstimate, estimate};
use crate::algorithm::metric::EdgeScorer;
use crate::io::error::Result;
use crate::spatial::raster::Raster;
use crate::spatial::stripes::{Stripe, StripeSet};

/// Result of reconstructing one shredded raster
///
/// Keeps the stripe set alive so the ordered stripes can be rendered
/// without extracting them again.
pub struct Reconstruction<'a> {
    estimate: WidthEstimate,
    assembly: Assembly,
    stripes: StripeSet<'a>,
}

impl Reconstruction<'_> {
    /// Width inference details
    pub const fn estimate(&self) -> &WidthEstimate {
        &self.estimate
    }

    /// Inferred stripe width
    pub const fn stripe_width(&self) -> usize {
        self.estimate.width
    }

    /// Assembly moves and final order
    pub const fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    /// Stripes left to right
    pub fn order(&self) -> &[Stripe] {
        &self.assembly.order
    }

    /// Shredded positions of the stripes, left to right
    pub fn indices(&self) -> Vec<usize> {
        self.assembly.indices()
    }

    /// Score cache hit and miss counts accumulated over both stages
    pub const fn cache_stats(&self) -> CacheStats {
        self.stripes.cache_stats()
    }

    /// Compose the reordered stripes into a single raster
    ///
    /// Remainder columns that did not form a whole stripe are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a stripe image cannot be extracted
    pub fn render(&mut self) -> Result<Raster> {
        self.stripes.render(&self.assembly.order)
    }
}

/// Estimate the stripe width, cut the raster and order its stripes
///
/// Columns and scores computed during estimation are reused during
/// assembly. The result depends only on the raster and `config`.
///
/// # Errors
///
/// Returns an error if:
/// - `config` fails validation
/// - The raster is shorter than three rows
/// - No stripe width can be inferred
pub fn reconstruct<'a>(raster: &'a Raster, config: &EstimatorConfig) -> Result<Reconstruction<'a>> {
    let mut scorer = EdgeScorer::new(raster);
    let estimate = estimate(&mut scorer, config)?;

    let mut stripes = StripeSet::from_scorer(scorer, estimate.width)?;
    let assembly = assemble(&mut stripes)?;

    Ok(Reconstruction {
        estimate,
        assembly,
        stripes,
    })
}
