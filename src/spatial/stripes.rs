//! Stripes of a shredded raster and the set that owns them

use crate::algorithm::cache::CacheStats;
use crate::algorithm::metric::EdgeScorer;
use crate::io::error::{Result, UnshredError, invalid_parameter};
use crate::spatial::column::PixelColumn;
use crate::spatial::raster::Raster;

/// A contiguous run of `width` columns starting at `index * width`
///
/// Stripes are plain handles; their edge columns and pixel content are
/// served lazily by the owning [`StripeSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stripe {
    index: usize,
    width: usize,
}

impl Stripe {
    /// Create the `index`-th stripe of the given width
    pub const fn new(index: usize, width: usize) -> Self {
        Self { index, width }
    }

    /// Position of the stripe in the shredded raster
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of columns in the stripe
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Raster column of the stripe's left edge
    pub const fn left_index(&self) -> usize {
        self.index * self.width
    }

    /// Raster column of the stripe's right edge
    pub const fn right_index(&self) -> usize {
        self.left_index() + self.width - 1
    }
}

/// All stripes of one raster plus the caches used while ordering them
///
/// Remainder columns to the right of the last whole stripe are not part of
/// any stripe.
pub struct StripeSet<'a> {
    scorer: EdgeScorer<'a>,
    stripe_width: usize,
    stripes: Vec<Stripe>,
    images: Vec<Option<Raster>>,
}

impl<'a> StripeSet<'a> {
    /// Cut `raster` into stripes of `stripe_width` columns
    ///
    /// # Errors
    ///
    /// Returns an error if the width is zero or wider than the raster
    pub fn new(raster: &'a Raster, stripe_width: usize) -> Result<Self> {
        Self::from_scorer(EdgeScorer::new(raster), stripe_width)
    }

    /// Cut the scorer's raster into stripes, keeping its cached columns and scores
    ///
    /// # Errors
    ///
    /// Returns an error if the width is zero or wider than the raster
    pub fn from_scorer(scorer: EdgeScorer<'a>, stripe_width: usize) -> Result<Self> {
        let image_width = scorer.raster().width();
        if stripe_width == 0 || stripe_width > image_width {
            return Err(invalid_parameter(
                "stripe_width",
                &stripe_width,
                &format!("must be between 1 and the image width {image_width}"),
            ));
        }

        let count = image_width / stripe_width;
        let stripes = (0..count)
            .map(|index| Stripe::new(index, stripe_width))
            .collect();

        Ok(Self {
            scorer,
            stripe_width,
            stripes,
            images: vec![None; count],
        })
    }

    /// Source raster
    pub const fn raster(&self) -> &'a Raster {
        self.scorer.raster()
    }

    /// Width shared by every stripe
    pub const fn stripe_width(&self) -> usize {
        self.stripe_width
    }

    /// Stripes in their shredded order
    pub fn stripes(&self) -> &[Stripe] {
        &self.stripes
    }

    /// Number of stripes
    pub fn len(&self) -> usize {
        self.stripes.len()
    }

    /// Whether the set holds no stripes
    pub fn is_empty(&self) -> bool {
        self.stripes.is_empty()
    }

    /// Stripe at position `index`
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such stripe
    pub fn stripe(&self, index: usize) -> Result<Stripe> {
        self.stripes
            .get(index)
            .copied()
            .ok_or_else(|| UnshredError::OutOfBounds {
                operation: "stripe",
                requested: (
                    index.saturating_mul(self.stripe_width),
                    0,
                    self.stripe_width,
                    self.raster().height(),
                ),
                available: (self.raster().width(), self.raster().height()),
            })
    }

    /// Leftmost pixel column of `stripe`
    ///
    /// # Errors
    ///
    /// Returns an error if the stripe lies outside the raster
    pub fn left_edge(&mut self, stripe: Stripe) -> Result<&PixelColumn> {
        self.scorer.column(stripe.left_index())
    }

    /// Rightmost pixel column of `stripe`
    ///
    /// # Errors
    ///
    /// Returns an error if the stripe lies outside the raster
    pub fn right_edge(&mut self, stripe: Stripe) -> Result<&PixelColumn> {
        self.scorer.column(stripe.right_index())
    }

    /// Edge likelihood of raster column `candidate` placed next to `subject`
    ///
    /// # Errors
    ///
    /// Returns an error if either column lies outside the raster
    pub fn score(&mut self, subject: usize, candidate: usize) -> Result<f64> {
        self.scorer.score(subject, candidate)
    }

    /// Pixel content of `stripe`, extracted on first use
    ///
    /// # Errors
    ///
    /// Returns an error if the stripe does not belong to this set
    pub fn stripe_image(&mut self, stripe: Stripe) -> Result<&Raster> {
        let raster = self.raster();
        let belongs = stripe.width() == self.stripe_width;
        let slot = self
            .images
            .get_mut(stripe.index())
            .filter(|_| belongs)
            .ok_or_else(|| {
                invalid_parameter(
                    "stripe",
                    &format!("{stripe:?}"),
                    &"stripe does not belong to this set",
                )
            })?;

        if slot.is_none() {
            *slot = Some(raster.extract_region(
                stripe.left_index(),
                0,
                stripe.width(),
                raster.height(),
            )?);
        }
        slot.as_ref().ok_or_else(|| {
            invalid_parameter("stripe", &stripe.index(), &"stripe image unavailable")
        })
    }

    /// Compose the stripes side by side in the given order
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is empty or names a foreign stripe
    pub fn render(&mut self, order: &[Stripe]) -> Result<Raster> {
        let mut parts = Vec::with_capacity(order.len());
        for &stripe in order {
            parts.push(self.stripe_image(stripe)?.clone());
        }
        Raster::compose_horizontal(&parts)
    }

    /// Score cache hit and miss counts
    pub const fn cache_stats(&self) -> CacheStats {
        self.scorer.stats()
    }
}
