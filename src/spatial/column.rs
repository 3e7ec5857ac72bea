//! Pixel columns sampled from a raster

use ndarray::{Array2, ArrayView1, ArrayView2};

/// One image column as an `(height, 3)` array of normalized RGB samples
///
/// The label is the column's position in the raster it was read from.
/// Columns are never modified after construction, so a cached column can
/// be compared against any number of neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelColumn {
    pixels: Array2<f64>,
    label: usize,
}

impl PixelColumn {
    /// Wrap an `(height, 3)` sample array
    pub const fn new(pixels: Array2<f64>, label: usize) -> Self {
        Self { pixels, label }
    }

    /// Build a column from a list of RGB triples
    pub fn from_rgb(samples: Vec<[f64; 3]>, label: usize) -> Self {
        Self::new(Array2::from(samples), label)
    }

    /// Original column position
    pub const fn label(&self) -> usize {
        self.label
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Borrow the sample array
    pub fn pixels(&self) -> ArrayView2<'_, f64> {
        self.pixels.view()
    }

    /// RGB sample at `row`
    pub fn pixel(&self, row: usize) -> Option<ArrayView1<'_, f64>> {
        (row < self.height()).then(|| self.pixels.row(row))
    }
}
