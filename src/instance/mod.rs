//! Problem instances.
//!
//! A [`ProblemInstance`] bundles the graph with per-vertex weights and
//! values and the knapsack capacity. It is validated once on construction
//! and read-only afterwards.

mod parse;
mod types;

pub use types::ProblemInstance;
