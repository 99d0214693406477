//! Randomized local moves over a [`SolutionState`](crate::state::SolutionState).
//!
//! Each move keeps the selection connected and ends within capacity:
//!
//! - **Grow-then-shrink**: add a random frontier vertex, then drop random
//!   removable vertices until the knapsack fits again.
//! - **Shrink-then-grow**: drop a random removable vertex, then add random
//!   frontier vertices that still fit until none does.

mod generator;

pub use generator::{MoveGenerator, MoveKind};
