//! Cutting rasters into shuffled stripes
//!
//! Produces shredded inputs with a known ground truth, for tests and
//! benchmarks.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::raster::Raster;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

/// Reorder the stripes of `raster` so that output stripe `i` is source stripe `permutation[i]`
///
/// Columns beyond the last whole stripe are kept, unshuffled, at the right
/// edge.
///
/// # Errors
///
/// Returns an error if:
/// - `stripe_width` is zero or wider than the raster
/// - `permutation` is not a permutation of the stripe indices
pub fn shred_with_permutation(
    raster: &Raster,
    stripe_width: usize,
    permutation: &[usize],
) -> Result<Raster> {
    let count = stripe_count(raster, stripe_width)?;

    let mut seen = vec![false; count];
    for &source in permutation {
        match seen.get_mut(source) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(invalid_parameter(
                    "permutation",
                    &format!("{permutation:?}"),
                    &format!("must contain each of 0..{count} exactly once"),
                ));
            }
        }
    }
    if permutation.len() != count {
        return Err(invalid_parameter(
            "permutation",
            &format!("{permutation:?}"),
            &format!("must contain each of 0..{count} exactly once"),
        ));
    }

    let height = raster.height();
    let mut parts = Vec::with_capacity(count + 1);
    for &source in permutation {
        parts.push(raster.extract_region(source * stripe_width, 0, stripe_width, height)?);
    }

    let covered = count * stripe_width;
    if covered < raster.width() {
        parts.push(raster.extract_region(covered, 0, raster.width() - covered, height)?);
    }

    Raster::compose_horizontal(&parts)
}

/// Shuffle the stripes of `raster` with a seeded random permutation
///
/// Returns the shredded raster and the permutation used, in the form
/// accepted by [`shred_with_permutation`].
///
/// # Errors
///
/// Returns an error if `stripe_width` is zero or wider than the raster
pub fn shred(raster: &Raster, stripe_width: usize, seed: u64) -> Result<(Raster, Vec<usize>)> {
    let count = stripe_count(raster, stripe_width)?;

    let mut permutation: Vec<usize> = (0..count).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let shredded = shred_with_permutation(raster, stripe_width, &permutation)?;
    Ok((shredded, permutation))
}

fn stripe_count(raster: &Raster, stripe_width: usize) -> Result<usize> {
    if stripe_width == 0 || stripe_width > raster.width() {
        return Err(invalid_parameter(
            "stripe_width",
            &stripe_width,
            &format!("must be between 1 and the image width {}", raster.width()),
        ));
    }
    Ok(raster.width() / stripe_width)
}
