//! Metric probes and score aggregation
//!
//! Each rubric dimension is computed by an independent probe with the shared
//! contract `async fn compute(&Client, &RepoSpec) -> Result<f64>`, producing a
//! score in `[0, 1]`. Probes are run through [`measure`], which times the full
//! probe body (failure paths included), bounds it with a timeout, and folds
//! the result into a [`MetricResult`]. One probe failing never prevents the
//! others from contributing.
//!
//! The [`aggregate`] function fans out all probes for a repository, combines
//! the computed scores into a weighted NetScore, and assembles the
//! [`AggregateRecord`] that the report layer serializes.

mod aggregate;
mod bus_factor;
mod correctness;
mod license;
mod outcome;
mod responsiveness;

pub use aggregate::{AggregateRecord, RUBRIC_WEIGHTS, RubricWeights, aggregate, combine_net_score};
pub use outcome::{MetricOutcome, MetricResult, measure};

#[cfg(any(debug_assertions, test))]
pub use license::extract_section;
