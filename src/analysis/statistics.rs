//! Summary statistics over seam scores and seam spacings

use num_traits::Float;
use std::collections::BTreeMap;

/// Arithmetic mean, or `None` for an empty slice
pub fn mean<F: Float>(values: &[F]) -> Option<F> {
    if values.is_empty() {
        return None;
    }
    let count = F::from(values.len())?;
    let total = values.iter().fold(F::zero(), |acc, &value| acc + value);
    Some(total / count)
}

/// Population standard deviation, or `None` for an empty slice
pub fn population_std_dev<F: Float>(values: &[F]) -> Option<F> {
    let centre = mean(values)?;
    let count = F::from(values.len())?;
    let squared = values.iter().fold(F::zero(), |acc, &value| {
        let deviation = value - centre;
        acc + deviation * deviation
    });
    Some((squared / count).sqrt())
}

/// Score above which a column pair is treated as a seam
///
/// Computed as `max - multiplier * stddev`. Only scores strictly above the
/// threshold count, so a distribution with no spread selects nothing.
pub fn outlier_threshold<F: Float>(values: &[F], multiplier: F) -> Option<F> {
    let spread = population_std_dev(values)?;
    let peak = values.iter().copied().fold(F::neg_infinity(), F::max);
    Some(peak - multiplier * spread)
}

/// Spacings between consecutive boundaries, measured from column 0
///
/// The image's left border is always a stripe boundary, so the first gap
/// runs from the origin to the first boundary. Boundaries are sorted and
/// deduplicated first.
pub fn boundary_gaps(boundaries: &[usize]) -> Vec<usize> {
    let mut sorted = boundaries.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut previous = 0;
    let mut gaps = Vec::with_capacity(sorted.len());
    for boundary in sorted {
        gaps.push(boundary - previous);
        previous = boundary;
    }
    gaps
}

/// Most frequent value, preferring the smallest on ties
pub fn histogram_mode(values: &[usize]) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    // Ascending iteration with a strict comparison keeps the smallest tied value
    let mut best: Option<(usize, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
