//! Simulated annealing over connected knapsack selections.
//!
//! [`AnnealingEngine`] seeds a greedy solution, calibrates an initial
//! temperature from the observed acceptance rate of worsening moves, then
//! cools geometrically until the value stops changing. Each trial move is
//! wrapped in a snapshot so a rejected move is undone exactly.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Johnson, Aragon, McGeoch & Schevon (1989), "Optimization by Simulated
//!   Annealing: An Experimental Evaluation; Part I, Graph Partitioning"

mod config;
mod engine;
mod types;

pub use config::AnnealConfig;
pub use engine::AnnealingEngine;
pub use types::{AnnealResult, LogSink, Phase, ResultSink, RunReport};
