//! Stripe width inference from adjacent column scores
//!
//! Every adjacent column pair in a prefix of the image is scored. Pairs
//! whose score sits in the upper tail of the distribution mark likely
//! shred boundaries, and the most common spacing between them is taken as
//! the stripe width.

use crate::algorithm::metric::EdgeScorer;
use crate::analysis::statistics::{boundary_gaps, histogram_mode, outlier_threshold};
use crate::io::configuration::{
    DEFAULT_MAX_COLUMN_PAIRS, DEFAULT_MIN_GAP, DEFAULT_STDDEV_MULTIPLIER,
};
use crate::io::error::{Result, UnshredError, invalid_parameter};
use crate::spatial::raster::Raster;

/// Parameters controlling seam detection during width estimation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorConfig {
    /// Number of adjacent column pairs scored, counted from the left edge
    pub max_column_pairs: usize,
    /// Standard deviations below the highest score still counted as a seam
    pub stddev_multiplier: f64,
    /// Smallest seam spacing accepted as a stripe width
    pub min_gap: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_column_pairs: DEFAULT_MAX_COLUMN_PAIRS,
            stddev_multiplier: DEFAULT_STDDEV_MULTIPLIER,
            min_gap: DEFAULT_MIN_GAP,
        }
    }
}

impl EstimatorConfig {
    /// Check that all parameters are usable
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_column_pairs` is zero
    /// - `stddev_multiplier` is negative or not finite
    /// - `min_gap` is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_column_pairs == 0 {
            return Err(invalid_parameter(
                "max_column_pairs",
                &self.max_column_pairs,
                &"at least one column pair must be scored",
            ));
        }
        if !self.stddev_multiplier.is_finite() || self.stddev_multiplier < 0.0 {
            return Err(invalid_parameter(
                "stddev_multiplier",
                &self.stddev_multiplier,
                &"must be a finite, non-negative number",
            ));
        }
        if self.min_gap == 0 {
            return Err(invalid_parameter(
                "min_gap",
                &self.min_gap,
                &"a stripe is at least one column wide",
            ));
        }
        Ok(())
    }
}

/// Outcome of width estimation with the evidence behind it
#[derive(Clone, Debug, PartialEq)]
pub struct WidthEstimate {
    /// Inferred stripe width in columns
    pub width: usize,
    /// Score cutoff used to select seams
    pub threshold: f64,
    /// Labels of the right-hand columns of selected seams, ascending
    pub seams: Vec<usize>,
    /// Number of adjacent column pairs scored
    pub column_pairs: usize,
}

impl WidthEstimate {
    /// Number of whole stripes of this width that fit in `image_width`
    pub const fn stripe_count(&self, image_width: usize) -> usize {
        image_width / self.width
    }
}

/// Infer the stripe width of a shredded raster
///
/// # Errors
///
/// Returns an error if:
/// - `config` fails validation
/// - The raster is too short for the metric
/// - No seam spacing survives filtering (`InsufficientSignal`)
pub fn estimate_width(raster: &Raster, config: &EstimatorConfig) -> Result<usize> {
    let mut scorer = EdgeScorer::new(raster);
    estimate(&mut scorer, config).map(|found| found.width)
}

/// Infer the stripe width using an existing scorer
///
/// Columns and scores computed here stay cached in `scorer` for the
/// assembly stage.
///
/// # Errors
///
/// Same conditions as [`estimate_width`]
pub fn estimate(scorer: &mut EdgeScorer<'_>, config: &EstimatorConfig) -> Result<WidthEstimate> {
    config.validate()?;

    let column_pairs = config
        .max_column_pairs
        .min(scorer.raster().width().saturating_sub(1));

    let mut labelled = Vec::with_capacity(column_pairs);
    for column in 0..column_pairs {
        let score = scorer.score(column, column + 1)?;
        labelled.push((column + 1, score));
    }

    let scores: Vec<f64> = labelled.iter().map(|&(_, score)| score).collect();
    let insufficient = |candidates| UnshredError::InsufficientSignal {
        column_pairs,
        candidates,
    };

    let threshold =
        outlier_threshold(&scores, config.stddev_multiplier).ok_or_else(|| insufficient(0))?;

    let mut seams: Vec<usize> = labelled
        .iter()
        .filter(|&&(_, score)| score > threshold)
        .map(|&(label, _)| label)
        .collect();
    seams.sort_unstable();

    let gaps: Vec<usize> = boundary_gaps(&seams)
        .into_iter()
        .filter(|&gap| gap >= config.min_gap)
        .collect();

    let width = histogram_mode(&gaps).ok_or_else(|| insufficient(seams.len()))?;

    Ok(WidthEstimate {
        width,
        threshold,
        seams,
        column_pairs,
    })
}
