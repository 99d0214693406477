//! Run outcome and reporting.

use std::time::Duration;

use tracing::info;

/// Lifecycle of an [`AnnealingEngine`](super::AnnealingEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Building the greedy initial solution.
    Seeding,
    /// Searching for an initial temperature.
    Calibrating,
    /// Main cooling loop.
    Annealing,
    /// Finished; the result is available.
    Done,
}

/// Result of one annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Best selection found, in ascending vertex order.
    pub best_vertices: Vec<usize>,

    /// Total value of the best selection.
    pub best_value: f64,

    /// Total weight of the best selection.
    pub best_cost: f64,

    /// Knapsack capacity of the instance.
    pub capacity: f64,

    /// Value of the greedy seed solution.
    pub seed_value: f64,

    /// Weight of the greedy seed solution.
    pub seed_cost: f64,

    /// Temperature found by calibration.
    pub initial_temperature: f64,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Trials run in the annealing phase.
    pub iterations: usize,

    /// Trials run while calibrating.
    pub calibration_trials: usize,

    /// Accepted annealing trials, including those that changed nothing.
    pub accepted_moves: usize,

    /// Accepted annealing trials that raised the current value.
    pub improving_moves: usize,

    /// Best value after each temperature step. Non-decreasing.
    pub value_history: Vec<f64>,

    /// Time spent building the seed solution.
    pub elapsed_seeding: Duration,

    /// Wall time of the whole run.
    pub elapsed_total: Duration,

    /// Seed of the random generator.
    pub seed: u64,
}

impl AnnealResult {
    /// Builds the payload handed to a [`ResultSink`].
    pub fn report(&self) -> RunReport {
        RunReport {
            elapsed_seeding: self.elapsed_seeding.as_secs_f64(),
            elapsed_total: self.elapsed_total.as_secs_f64(),
            final_cost: self.best_cost,
            capacity: self.capacity,
            best_value: self.best_value,
            total_iterations: self.iterations,
            best_solution_size: self.best_vertices.len(),
            best_solution_vertices: self.best_vertices.clone(),
            seed: self.seed,
        }
    }
}

/// Per-run summary for formatting or persistence. Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub elapsed_seeding: f64,
    pub elapsed_total: f64,
    pub final_cost: f64,
    pub capacity: f64,
    pub best_value: f64,
    pub total_iterations: usize,
    pub best_solution_size: usize,
    pub best_solution_vertices: Vec<usize>,
    pub seed: u64,
}

/// Receives the report of each finished run.
pub trait ResultSink {
    fn record(&mut self, report: &RunReport);
}

impl ResultSink for Vec<RunReport> {
    fn record(&mut self, report: &RunReport) {
        self.push(report.clone());
    }
}

/// Emits each report as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ResultSink for LogSink {
    fn record(&mut self, report: &RunReport) {
        info!(
            seed = report.seed,
            best_value = report.best_value,
            cost = report.final_cost,
            capacity = report.capacity,
            size = report.best_solution_size,
            iterations = report.total_iterations,
            seeding_secs = report.elapsed_seeding,
            total_secs = report.elapsed_total,
            vertices = ?report.best_solution_vertices,
            "run finished"
        );
    }
}
