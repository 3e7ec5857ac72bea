//! Greedy double-ended stripe ordering
//!
//! The order starts from the first stripe and grows one stripe at a time
//! at whichever end accepts the least seam-like neighbour. Because only
//! pairwise seams are measured, the result may come out mirrored.

use crate::io::error::Result;
use crate::spatial::stripes::{Stripe, StripeSet};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// End of the current order a stripe was attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Placed before the current leftmost stripe
    Left,
    /// Placed after the current rightmost stripe
    Right,
}

/// One accepted move of the assembler
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Index of the placed stripe
    pub stripe: usize,
    /// End it was attached to
    pub side: Side,
    /// Edge likelihood of the seam it created
    pub score: f64,
}

/// Ordered stripes together with the moves that produced them
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    /// Index of the stripe the order was started from
    pub seed: usize,
    /// Accepted moves in the order they were made
    pub placements: Vec<Placement>,
    /// Final left-to-right order
    pub order: Vec<Stripe>,
}

impl Assembly {
    /// Stripe indices of the final order
    pub fn indices(&self) -> Vec<usize> {
        self.order.iter().map(Stripe::index).collect()
    }

    /// Sum of the seam scores of all placements
    pub fn total_score(&self) -> f64 {
        self.placements.iter().map(|placement| placement.score).sum()
    }
}

/// Order every stripe of `set` end to end
///
/// Candidates are generated per unused stripe in index order, left side
/// first, and the first candidate with the lowest score wins. Every
/// stripe appears exactly once in the result.
///
/// # Errors
///
/// Returns an error if a stripe edge cannot be scored
pub fn assemble(set: &mut StripeSet<'_>) -> Result<Assembly> {
    let count = set.len();
    let seed = 0;
    let mut placements = Vec::with_capacity(count.saturating_sub(1));

    if count == 0 {
        return Ok(Assembly {
            seed,
            placements,
            order: Vec::new(),
        });
    }

    let mut used = bitvec![0; count];
    used.set(seed, true);
    let mut order = VecDeque::with_capacity(count);
    order.push_back(set.stripe(seed)?);

    while used.not_all() {
        let (Some(&first), Some(&last)) = (order.front(), order.back()) else {
            break;
        };

        let mut best: Option<Placement> = None;
        for index in used.iter_zeros() {
            let stripe = set.stripe(index)?;

            let left = Placement {
                stripe: index,
                side: Side::Left,
                score: set.score(first.left_index(), stripe.right_index())?,
            };
            let right = Placement {
                stripe: index,
                side: Side::Right,
                score: set.score(last.right_index(), stripe.left_index())?,
            };

            for candidate in [left, right] {
                if best.is_none_or(|current| candidate.score < current.score) {
                    best = Some(candidate);
                }
            }
        }

        let Some(chosen) = best else {
            break;
        };
        let stripe = set.stripe(chosen.stripe)?;
        match chosen.side {
            Side::Left => order.push_front(stripe),
            Side::Right => order.push_back(stripe),
        }
        used.set(chosen.stripe, true);
        placements.push(chosen);
    }

    Ok(Assembly {
        seed,
        placements,
        order: order.into(),
    })
}
