use crate::io::error::{Result, UnshredError};
use crate::spatial::column::PixelColumn;
use crate::spatial::raster::Raster;
use std::collections::HashMap;

/// Key for caching edge-likelihood scores
///
/// Identifies an ordered (subject, candidate) column pair by label. The
/// order matters because the metric measures against the subject's own
/// vertical variation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ScoreKey {
    subject: usize,
    candidate: usize,
}

impl ScoreKey {
    /// Create a key for scoring `candidate` against `subject`
    pub const fn new(subject: usize, candidate: usize) -> Self {
        Self { subject, candidate }
    }

    /// Label of the subject column
    pub const fn subject(&self) -> usize {
        self.subject
    }

    /// Label of the candidate column
    pub const fn candidate(&self) -> usize {
        self.candidate
    }
}

/// Memoization cache for edge-likelihood scores
///
/// Lives inside a single scorer, so scores are never shared between
/// different images.
#[derive(Default)]
pub struct ScoreCache {
    scores: HashMap<ScoreKey, f64>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl ScoreCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scores
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Retrieve a cached score or compute and store a new one
    ///
    /// Failed computations are not stored.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `compute_fn`
    pub fn get_or_try_compute<F>(&mut self, key: ScoreKey, compute_fn: F) -> Result<f64>
    where
        F: FnOnce() -> Result<f64>,
    {
        use std::collections::hash_map::Entry;

        match self.scores.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(*entry.get())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                Ok(*entry.insert(compute_fn()?))
            }
        }
    }
}

/// Lazily populated pixel columns of one raster, indexed by column
#[derive(Debug, Default)]
pub struct ColumnCache {
    columns: Vec<Option<PixelColumn>>,
}

impl ColumnCache {
    /// Create an empty cache for a raster `width` columns wide
    pub fn new(width: usize) -> Self {
        Self {
            columns: vec![None; width],
        }
    }

    /// Number of columns extracted so far
    pub fn loaded(&self) -> usize {
        self.columns.iter().filter(|column| column.is_some()).count()
    }

    /// Previously extracted column, if any
    pub fn get(&self, index: usize) -> Option<&PixelColumn> {
        self.columns.get(index).and_then(Option::as_ref)
    }

    /// Return column `index`, extracting it from `raster` on first use
    ///
    /// # Errors
    ///
    /// Returns an error if `index` lies outside the raster
    pub fn fetch(&mut self, raster: &Raster, index: usize) -> Result<&PixelColumn> {
        let available = (raster.width(), raster.height());
        let out_of_bounds = || UnshredError::OutOfBounds {
            operation: "column",
            requested: (index, 0, 1, available.1),
            available,
        };

        let slot = self.columns.get_mut(index).ok_or_else(out_of_bounds)?;
        if slot.is_none() {
            *slot = Some(raster.column(index)?);
        }
        slot.as_ref().ok_or_else(out_of_bounds)
    }
}
