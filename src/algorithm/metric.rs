//! Edge-likelihood metric between two pixel columns
//!
//! A row of the subject column counts as edge-like when the colour jump to
//! the candidate column exceeds the subject's jump to either of its own
//! vertical neighbours. Real neighbours in an image mostly change less
//! sideways than they do along the column, while two unrelated columns
//! pushed together do not.

use crate::algorithm::cache::{CacheStats, ColumnCache, ScoreCache, ScoreKey};
use crate::io::configuration::{INTENSITY_WEIGHTS, MIN_COLUMN_HEIGHT};
use crate::io::error::{Result, UnshredError};
use crate::spatial::column::PixelColumn;
use crate::spatial::raster::Raster;
use ndarray::{Array1, Array2, aview1, s};

/// Fraction of rows in `subject` that look like a seam next to `candidate`
///
/// Only interior rows are classified, but the count is divided by the full
/// column height. The result lies in `[0, 1]` and is zero when a column is
/// compared with itself.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the columns differ in height or are
/// shorter than three rows
pub fn edge_likelihood(subject: &PixelColumn, candidate: &PixelColumn) -> Result<f64> {
    let height = subject.height();
    if height != candidate.height() || height < MIN_COLUMN_HEIGHT {
        return Err(UnshredError::DimensionMismatch {
            subject: height,
            candidate: candidate.height(),
        });
    }

    let own = subject.pixels();
    let other = candidate.pixels();
    let interior = own.slice(s![1..height - 1, ..]);

    let cross = intensity(&(&interior - &other.slice(s![1..height - 1, ..])));
    let up = intensity(&(&interior - &own.slice(s![..height - 2, ..])));
    let down = intensity(&(&interior - &own.slice(s![2.., ..])));

    let edge_like = cross
        .iter()
        .zip(&up)
        .zip(&down)
        .filter(|&((cross, up), down)| cross > down || cross > up)
        .count();

    Ok(edge_like as f64 / height as f64)
}

/// Perceptual intensity of each row of an RGB difference array
///
/// Channels are taken as absolute values before weighting, so the result is
/// never negative.
pub fn intensity(difference: &Array2<f64>) -> Array1<f64> {
    difference.mapv(f64::abs).dot(&aview1(&INTENSITY_WEIGHTS))
}

/// Scores column pairs of one raster, caching columns and results
///
/// Each scorer belongs to exactly one raster; building a new scorer starts
/// from empty caches.
pub struct EdgeScorer<'a> {
    raster: &'a Raster,
    columns: ColumnCache,
    scores: ScoreCache,
}

impl<'a> EdgeScorer<'a> {
    /// Create a scorer with empty caches
    pub fn new(raster: &'a Raster) -> Self {
        Self {
            raster,
            columns: ColumnCache::new(raster.width()),
            scores: ScoreCache::new(),
        }
    }

    /// Raster being scored
    pub const fn raster(&self) -> &'a Raster {
        self.raster
    }

    /// Column `index`, extracted on first use
    ///
    /// # Errors
    ///
    /// Returns an error if `index` lies outside the raster
    pub fn column(&mut self, index: usize) -> Result<&PixelColumn> {
        self.columns.fetch(self.raster, index)
    }

    /// Edge likelihood of column `candidate` placed next to column `subject`
    ///
    /// # Errors
    ///
    /// Returns an error if either index lies outside the raster or the
    /// raster is too short to score
    pub fn score(&mut self, subject: usize, candidate: usize) -> Result<f64> {
        self.columns.fetch(self.raster, subject)?;
        self.columns.fetch(self.raster, candidate)?;

        let raster = self.raster;
        let columns = &self.columns;
        self.scores
            .get_or_try_compute(ScoreKey::new(subject, candidate), || {
                match (columns.get(subject), columns.get(candidate)) {
                    (Some(left), Some(right)) => edge_likelihood(left, right),
                    _ => Err(UnshredError::OutOfBounds {
                        operation: "column",
                        requested: (subject.max(candidate), 0, 1, raster.height()),
                        available: (raster.width(), raster.height()),
                    }),
                }
            })
    }

    /// Score cache hit and miss counts
    pub const fn stats(&self) -> CacheStats {
        self.scores.stats
    }

    /// Number of columns extracted so far
    pub fn columns_loaded(&self) -> usize {
        self.columns.loaded()
    }
}
