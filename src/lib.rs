//! Maximum-weight connected subgraph under a knapsack constraint.
//!
//! Given an undirected graph with a weight and a value on every vertex and
//! a capacity, find a vertex subset of maximum total value whose total
//! weight fits the capacity and whose induced subgraph is connected.
//!
//! The search is a simulated annealing heuristic built on an incremental
//! solution state:
//!
//! - **[`graph`]**: static adjacency lists, connectivity checks, and
//!   articulation-point detection on induced subgraphs.
//! - **[`instance`]**: validated problem data and a plain-text reader.
//! - **[`state`]**: the always-connected, always-feasible selection with
//!   its frontier, neighbor counters and removable-vertex cache, plus
//!   value-copy checkpoints for rollback.
//! - **[`moves`]**: randomized grow-then-shrink / shrink-then-grow moves.
//! - **[`anneal`]**: greedy seeding, temperature calibration, and the
//!   cooling loop.
//!
//! # Example
//!
//! ```
//! use u_mwcs::anneal::{AnnealConfig, AnnealingEngine, ResultSink, RunReport};
//! use u_mwcs::instance::ProblemInstance;
//!
//! let instance: ProblemInstance = "4 3 2\n1 1 1 1\n5 3 4 2\n0 1\n1 2\n2 3\n"
//!     .parse()
//!     .unwrap();
//! let config = AnnealConfig::default().with_seed(1).with_final_acceptance(0.01);
//! let result = AnnealingEngine::new(&instance, config).unwrap().run();
//!
//! let mut reports: Vec<RunReport> = Vec::new();
//! reports.record(&result.report());
//! assert_eq!(reports[0].best_value, 8.0);
//! ```
//!
//! The search is single-threaded and fully determined by the instance and
//! the seed.

pub mod anneal;
pub mod error;
pub mod graph;
pub mod instance;
pub mod moves;
pub mod state;

pub use error::{ConfigError, Error, InstanceError};
