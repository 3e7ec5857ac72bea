/// Greedy double-ended stripe ordering
pub mod assembly;
/// Memoization of pixel columns and pair scores
pub mod cache;
/// Stripe width inference
pub mod estimator;
/// End-to-end reconstruction of one raster
pub mod executor;
/// Edge-likelihood metric between pixel columns
pub mod metric;
