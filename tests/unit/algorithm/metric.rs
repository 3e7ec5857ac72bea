//! Tests for the edge-likelihood metric and the caching scorer

#[cfg(test)]
mod tests {
    use crate::common::{HEIGHT, ramp, shredded_ramp};
    use ndarray::array;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use unshred::UnshredError;
    use unshred::algorithm::metric::{EdgeScorer, edge_likelihood, intensity};
    use unshred::spatial::column::PixelColumn;

    fn constant(value: f64, height: usize, label: usize) -> PixelColumn {
        PixelColumn::from_rgb(vec![[value; 3]; height], label)
    }

    fn alternating(height: usize, label: usize) -> PixelColumn {
        let samples = (0..height)
            .map(|row| if row % 2 == 0 { [0.0; 3] } else { [1.0; 3] })
            .collect();
        PixelColumn::from_rgb(samples, label)
    }

    // Tests a column never looks like a seam against itself
    // Verified by comparing with >= instead of >
    #[test]
    fn test_self_score_is_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for label in 0..10 {
            let samples = (0..40)
                .map(|_| [rng.random(), rng.random(), rng.random()])
                .collect();
            let column = PixelColumn::from_rgb(samples, label);
            let score = edge_likelihood(&column, &column).expect("equal heights");
            assert!(score.abs() < f64::EPSILON, "self score was {score}");
        }
    }

    // Tests scores stay within the unit interval for arbitrary columns
    // Verified by dividing by the interior row count
    #[test]
    fn test_score_within_unit_interval() {
        let mut rng = StdRng::seed_from_u64(11);
        for height in [3, 4, 17, 64] {
            for _ in 0..20 {
                let mut column = |label| {
                    let samples = (0..height)
                        .map(|_| [rng.random(), rng.random(), rng.random()])
                        .collect();
                    PixelColumn::from_rgb(samples, label)
                };
                let subject = column(0);
                let candidate = column(1);
                let score = edge_likelihood(&subject, &candidate).expect("equal heights");
                assert!((0.0..=1.0).contains(&score), "score {score} out of range");
            }
        }
    }

    // Tests the denominator is the full column height
    // Verified by dividing by the interior row count
    #[test]
    fn test_denominator_includes_border_rows() {
        let subject = constant(0.5, 4, 0);
        let candidate = constant(0.0, 4, 1);

        let score = edge_likelihood(&subject, &candidate).expect("equal heights");
        assert!((score - 0.5).abs() < 1e-12, "expected 2/4, got {score}");
    }

    // Tests the subject's own vertical variation is the baseline
    // Verified by using the candidate's variation instead
    #[test]
    fn test_score_is_asymmetric() {
        let busy = alternating(6, 0);
        let flat = constant(0.5, 6, 1);

        let busy_first = edge_likelihood(&busy, &flat).expect("equal heights");
        let flat_first = edge_likelihood(&flat, &busy).expect("equal heights");

        assert!(busy_first.abs() < f64::EPSILON);
        assert!((flat_first - 4.0 / 6.0).abs() < 1e-12);
    }

    // Tests either neighbour being calmer than the cross step is enough
    // Verified by requiring both vertical steps to be smaller
    #[test]
    fn test_single_calm_neighbour_marks_row() {
        // Row 1 differs from row 0 but matches row 2
        let subject = PixelColumn::from_rgb(vec![[0.0; 3], [0.6; 3], [0.6; 3]], 0);
        let candidate = PixelColumn::from_rgb(vec![[0.0; 3], [0.3; 3], [0.0; 3]], 1);

        let score = edge_likelihood(&subject, &candidate).expect("equal heights");
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    // Tests columns of different heights are rejected
    // Verified by comparing only the shorter prefix
    #[test]
    fn test_dimension_mismatch() {
        let short = constant(0.2, 5, 0);
        let long = constant(0.2, 6, 1);

        let result = edge_likelihood(&short, &long);
        assert!(matches!(
            result,
            Err(UnshredError::DimensionMismatch {
                subject: 5,
                candidate: 6
            })
        ));
    }

    // Tests columns without interior rows are rejected
    // Verified by removing the minimum height check
    #[test]
    fn test_too_short_columns() {
        let a = constant(0.2, 2, 0);
        let b = constant(0.7, 2, 1);

        assert!(matches!(
            edge_likelihood(&a, &b),
            Err(UnshredError::DimensionMismatch { .. })
        ));
    }

    // Tests perceptual weights applied to absolute channel differences
    // Verified by dropping the absolute value
    #[test]
    fn test_intensity_weights() {
        let difference = array![[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 2.0]];
        let result = intensity(&difference);

        assert!((result[0] - 0.299).abs() < 1e-12);
        assert!((result[1] - 0.587).abs() < 1e-12);
        assert!((result[2] - 0.228).abs() < 1e-12);
    }

    // Tests true neighbours score zero and a shred seam scores high on the ramp fixture
    // Verified by swapping the cross and vertical comparisons
    #[test]
    fn test_scorer_separates_neighbours_from_seams() {
        let raster = shredded_ramp();
        let mut scorer = EdgeScorer::new(&raster);

        let inside = scorer.score(5, 6).expect("columns exist");
        let seam = scorer.score(19, 20).expect("columns exist");

        assert!(inside.abs() < f64::EPSILON);
        let expected = (HEIGHT - 2) as f64 / HEIGHT as f64;
        assert!((seam - expected).abs() < 1e-12, "seam scored {seam}");
    }

    // Tests repeated scoring hits the cache and loads each column once
    // Verified by clearing the cache between calls
    #[test]
    fn test_scorer_caches_results() {
        let raster = ramp(10, 8);
        let mut scorer = EdgeScorer::new(&raster);

        let first = scorer.score(2, 3).expect("columns exist");
        let second = scorer.score(2, 3).expect("columns exist");
        let reversed = scorer.score(3, 2).expect("columns exist");

        assert!((first - second).abs() < f64::EPSILON);
        assert!(reversed.is_finite());
        assert_eq!(scorer.stats().hits, 1);
        assert_eq!(scorer.stats().misses, 2);
        assert_eq!(scorer.columns_loaded(), 2);
    }

    // Tests separate scorers do not share results
    // Verified by making the score cache global
    #[test]
    fn test_scorers_are_independent() {
        let raster = ramp(10, 8);
        let mut first = EdgeScorer::new(&raster);
        first.score(0, 1).expect("columns exist");

        let second = EdgeScorer::new(&raster);
        assert_eq!(second.stats().hits + second.stats().misses, 0);
        assert_eq!(second.columns_loaded(), 0);
    }

    // Tests scoring a column outside the raster fails
    // Verified by clamping the column index
    #[test]
    fn test_scorer_out_of_bounds() {
        let raster = ramp(4, 8);
        let mut scorer = EdgeScorer::new(&raster);

        assert!(matches!(
            scorer.score(3, 4),
            Err(UnshredError::OutOfBounds { .. })
        ));
    }
}
