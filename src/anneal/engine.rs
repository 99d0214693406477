//! Annealing control loop.
//!
//! # Algorithm
//!
//! 1. **Seeding**: greedily add the admissible vertex with the best
//!    value/weight ratio until none is left.
//! 2. **Calibrating**: starting from `T = 50 + value / 100`, run batches of
//!    trial moves and multiply `T` by the growth factor until the share of
//!    accepted worsening moves reaches the target initial acceptance.
//! 3. **Annealing**: run a fixed number of trials per temperature, cool
//!    geometrically, stop once `round(1 / p_final)` trials in a row leave the
//!    value unchanged.
//!
//! Every trial snapshots the state, applies one move, and either keeps it
//! (Metropolis rule) or restores the snapshot.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::AnnealConfig;
use super::types::{AnnealResult, Phase};
use crate::error::Error;
use crate::instance::ProblemInstance;
use crate::moves::MoveGenerator;
use crate::state::{Checkpoint, SolutionState};

/// Value changes at or below this magnitude count as "no change".
const VALUE_EPSILON: f64 = 1e-9;

/// Lower bound on the starting calibration temperature.
const MIN_START_TEMPERATURE: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
struct Trial {
    delta: f64,
    accepted: bool,
}

impl Trial {
    fn is_worsening(&self) -> bool {
        self.delta < -VALUE_EPSILON
    }

    fn changed_value(&self) -> bool {
        self.delta.abs() > VALUE_EPSILON
    }
}

/// Simulated annealing over a [`SolutionState`].
///
/// Drive it in one call with [`run`](Self::run), or phase by phase with
/// [`seed`](Self::seed), [`calibrate`](Self::calibrate) and
/// [`anneal`](Self::anneal). Each step does nothing unless the engine is in
/// the matching [`Phase`].
///
/// # Examples
///
/// ```
/// use u_mwcs::anneal::{AnnealConfig, AnnealingEngine};
/// use u_mwcs::instance::ProblemInstance;
///
/// let instance = ProblemInstance::from_edges(
///     2.0,
///     vec![1.0, 1.0, 1.0, 1.0],
///     vec![5.0, 3.0, 4.0, 2.0],
///     &[(0, 1), (1, 2), (2, 3)],
/// )
/// .unwrap();
/// let config = AnnealConfig::default().with_seed(42).with_final_acceptance(0.01);
/// let result = AnnealingEngine::new(&instance, config).unwrap().run();
/// assert_eq!(result.best_value, 8.0);
/// assert_eq!(result.best_vertices, vec![0, 1]);
/// ```
pub struct AnnealingEngine<'p> {
    instance: &'p ProblemInstance,
    config: AnnealConfig,
    seed: u64,
    rng: StdRng,
    state: SolutionState<'p>,
    moves: MoveGenerator,
    best: Checkpoint,
    phase: Phase,

    initial_temperature: f64,
    temperature: f64,
    seed_value: f64,
    seed_cost: f64,
    iterations: usize,
    calibration_trials: usize,
    accepted_moves: usize,
    improving_moves: usize,
    value_history: Vec<f64>,

    started: Instant,
    elapsed_seeding: Duration,
}

impl<'p> AnnealingEngine<'p> {
    /// Validates `config` and prepares an engine in [`Phase::Seeding`].
    pub fn new(instance: &'p ProblemInstance, config: AnnealConfig) -> Result<Self, Error> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let state = SolutionState::new(instance);
        let best = state.checkpoint();
        let moves = MoveGenerator::new(config.grow_probability);

        Ok(Self {
            instance,
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            state,
            moves,
            best,
            phase: Phase::Seeding,
            initial_temperature: 0.0,
            temperature: 0.0,
            seed_value: 0.0,
            seed_cost: 0.0,
            iterations: 0,
            calibration_trials: 0,
            accepted_moves: 0,
            improving_moves: 0,
            value_history: Vec::new(),
            started: Instant::now(),
            elapsed_seeding: Duration::ZERO,
        })
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current (not necessarily best) solution.
    #[inline]
    pub fn state(&self) -> &SolutionState<'p> {
        &self.state
    }

    /// Best solution seen so far.
    #[inline]
    pub fn best(&self) -> &Checkpoint {
        &self.best
    }

    #[inline]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds the greedy seed solution.
    ///
    /// Vertices are tried by descending value/weight ratio; the first
    /// admissible one is added and the scan restarts. If no vertex fits at
    /// all the run ends here with an empty solution.
    pub fn build_seed(&mut self) {
        if self.phase != Phase::Seeding {
            return;
        }
        let started = Instant::now();

        let order = self.instance.vertices_by_ratio();
        while let Some(v) = order.iter().copied().find(|&v| self.state.can_add(v)) {
            self.state.add(v);
        }
        self.state.refresh_removable();
        self.best = self.state.checkpoint();
        self.seed_value = self.state.value();
        self.seed_cost = self.state.cost();
        self.elapsed_seeding = started.elapsed();

        info!(
            value = self.seed_value,
            cost = self.seed_cost,
            capacity = self.instance.capacity(),
            size = self.state.selected().len(),
            "seed solution built"
        );

        self.phase = if self.state.is_empty() {
            Phase::Done
        } else {
            Phase::Calibrating
        };
    }

    /// Raises the temperature until enough worsening moves are accepted.
    ///
    /// A batch without any worsening trial counts as meeting the target.
    pub fn calibrate(&mut self) {
        if self.phase != Phase::Calibrating {
            return;
        }

        let target = self.config.initial_acceptance;
        let batch = self
            .config
            .calibration_batch_size(self.instance.vertex_count());
        let mut temperature = (50.0 + self.best.value() / 100.0).max(MIN_START_TEMPERATURE);

        loop {
            let mut tried = 0usize;
            let mut accepted = 0usize;
            for _ in 0..batch {
                let trial = self.trial(temperature);
                self.calibration_trials += 1;
                if trial.is_worsening() {
                    tried += 1;
                    if trial.accepted {
                        accepted += 1;
                    }
                }
                if trial.accepted {
                    self.record_best();
                }
            }

            let rate = if tried == 0 {
                1.0
            } else {
                accepted as f64 / tried as f64
            };
            debug!(temperature, tried, accepted, rate, "calibration batch");
            if rate >= target {
                break;
            }
            temperature *= self.config.calibration_growth;
        }

        self.initial_temperature = temperature;
        self.temperature = temperature;
        info!(
            temperature,
            trials = self.calibration_trials,
            "initial temperature calibrated"
        );
        self.phase = Phase::Annealing;
    }

    /// Main cooling loop.
    pub fn anneal(&mut self) {
        if self.phase != Phase::Annealing {
            return;
        }

        let max_tries = self.config.max_tries_without_improvement();
        let per_temperature = self
            .config
            .iterations_per_temperature(self.instance.vertex_count());
        let budget = self.config.max_iterations;
        let mut remaining = max_tries;

        'cooling: loop {
            for _ in 0..per_temperature {
                if budget > 0 && self.iterations >= budget {
                    break 'cooling;
                }

                let trial = self.trial(self.temperature);
                self.iterations += 1;

                if trial.accepted {
                    self.accepted_moves += 1;
                    if trial.delta > VALUE_EPSILON {
                        self.improving_moves += 1;
                    }
                    if trial.changed_value() {
                        remaining = max_tries;
                    } else {
                        remaining -= 1;
                    }
                    self.record_best();
                } else {
                    remaining -= 1;
                }

                if remaining == 0 {
                    break 'cooling;
                }
            }

            self.value_history.push(self.best.value());
            debug!(
                temperature = self.temperature,
                current = self.state.value(),
                best = self.best.value(),
                remaining,
                "temperature step"
            );
            self.temperature *= self.config.cooling_factor;
        }

        if self.value_history.last() != Some(&self.best.value()) {
            self.value_history.push(self.best.value());
        }
        info!(
            best = self.best.value(),
            cost = self.best.cost(),
            iterations = self.iterations,
            temperature = self.temperature,
            "annealing finished"
        );
        self.phase = Phase::Done;
    }

    /// Runs every remaining phase and returns the result.
    pub fn run(mut self) -> AnnealResult {
        self.build_seed();
        self.calibrate();
        self.anneal();
        self.into_result()
    }

    fn into_result(self) -> AnnealResult {
        AnnealResult {
            best_vertices: self.best.vertices(),
            best_value: self.best.value(),
            best_cost: self.best.cost(),
            capacity: self.instance.capacity(),
            seed_value: self.seed_value,
            seed_cost: self.seed_cost,
            initial_temperature: self.initial_temperature,
            final_temperature: self.temperature,
            iterations: self.iterations,
            calibration_trials: self.calibration_trials,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            value_history: self.value_history,
            elapsed_seeding: self.elapsed_seeding,
            elapsed_total: self.started.elapsed(),
            seed: self.seed,
        }
    }

    /// Snapshot, move, then keep or roll back by the Metropolis rule.
    fn trial(&mut self, temperature: f64) -> Trial {
        let checkpoint = self.state.checkpoint();
        let before = self.state.value();
        self.moves.apply(&mut self.state, &mut self.rng);
        let delta = self.state.value() - before;

        let accepted = metropolis(delta, temperature, &mut self.rng);
        if !accepted {
            self.state.restore(checkpoint);
        }
        Trial { delta, accepted }
    }

    fn record_best(&mut self) {
        if self.state.value() > self.best.value() {
            trace!(
                value = self.state.value(),
                previous = self.best.value(),
                "new best"
            );
            self.best = self.state.checkpoint();
        }
    }
}

/// Metropolis acceptance for maximization: non-worsening moves always pass,
/// worsening ones with probability `exp(delta / T)`.
fn metropolis<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta >= -VALUE_EPSILON {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.random_range(0.0..1.0) < (delta / temperature).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_instance() -> ProblemInstance {
        ProblemInstance::from_edges(
            2.0,
            vec![1.0, 1.0, 1.0, 1.0],
            vec![5.0, 3.0, 4.0, 2.0],
            &[(0, 1), (1, 2), (2, 3)],
        )
        .unwrap()
    }

    // 4x4 grid with varied weights and values
    fn grid_instance() -> ProblemInstance {
        let side = 4;
        let mut edges = Vec::new();
        for r in 0..side {
            for c in 0..side {
                let v = side * r + c;
                if c + 1 < side {
                    edges.push((v, v + 1));
                }
                if r + 1 < side {
                    edges.push((v, v + side));
                }
            }
        }
        let weights = (0..16).map(|v| 1.0 + (v * 7 % 5) as f64).collect();
        let values = (0..16).map(|v| 2.0 + (v * 11 % 9) as f64).collect();
        ProblemInstance::from_edges(12.0, weights, values, &edges).unwrap()
    }

    fn quick_config(seed: u64) -> AnnealConfig {
        AnnealConfig::default()
            .with_seed(seed)
            .with_final_acceptance(0.01)
            .with_cooling_factor(0.95)
    }

    #[test]
    fn test_metropolis_rule() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(metropolis(3.0, 1.0, &mut rng));
        assert!(metropolis(0.0, 1.0, &mut rng));
        assert!(!metropolis(-1.0, 0.0, &mut rng));
        // exp(-1000) underflows to zero
        assert!(!metropolis(-1000.0, 1.0, &mut rng));

        let accepted = (0..10_000)
            .filter(|_| metropolis(-1.0, 1.0, &mut rng))
            .count();
        let rate = accepted as f64 / 10_000.0;
        assert!((rate - (-1.0f64).exp()).abs() < 0.03, "rate {rate}");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let instance = path_instance();
        let config = AnnealConfig::default().with_cooling_factor(2.0);
        assert!(matches!(
            AnnealingEngine::new(&instance, config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_phases_in_order() {
        let instance = path_instance();
        let mut engine = AnnealingEngine::new(&instance, quick_config(1)).unwrap();
        assert_eq!(engine.phase(), Phase::Seeding);

        // out-of-order steps do nothing
        engine.anneal();
        assert_eq!(engine.phase(), Phase::Seeding);

        engine.build_seed();
        assert_eq!(engine.phase(), Phase::Calibrating);
        assert_eq!(engine.best().vertices(), vec![0, 1]);

        engine.calibrate();
        assert_eq!(engine.phase(), Phase::Annealing);
        assert!(engine.temperature() >= 50.0);

        engine.anneal();
        assert_eq!(engine.phase(), Phase::Done);
    }

    #[test]
    fn test_seed_on_path() {
        let instance = path_instance();
        let mut engine = AnnealingEngine::new(&instance, quick_config(3)).unwrap();
        engine.build_seed();
        assert_eq!(engine.state().vertices(), vec![0, 1]);
        assert_eq!(engine.state().value(), 8.0);
        assert_eq!(engine.state().cost(), 2.0);
    }

    #[test]
    fn test_run_is_reproducible() {
        let instance = grid_instance();
        let a = AnnealingEngine::new(&instance, quick_config(99)).unwrap().run();
        let b = AnnealingEngine::new(&instance, quick_config(99)).unwrap().run();
        assert_eq!(a.best_vertices, b.best_vertices);
        assert_eq!(a.best_value, b.best_value);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.calibration_trials, b.calibration_trials);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_run_result_is_feasible_and_not_worse_than_seed() {
        let instance = grid_instance();
        let result = AnnealingEngine::new(&instance, quick_config(5)).unwrap().run();

        assert!(result.best_value >= result.seed_value);
        assert!(result.best_cost <= instance.capacity());
        assert!(instance.graph().is_connected(&result.best_vertices));

        let cost: f64 = result.best_vertices.iter().map(|&v| instance.weight(v)).sum();
        let value: f64 = result.best_vertices.iter().map(|&v| instance.value(v)).sum();
        assert!((cost - result.best_cost).abs() < 1e-9);
        assert!((value - result.best_value).abs() < 1e-9);

        for window in result.value_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert!(result.final_temperature < result.initial_temperature);
    }

    #[test]
    fn test_iteration_budget() {
        let instance = grid_instance();
        let config = quick_config(8).with_max_iterations(37);
        let result = AnnealingEngine::new(&instance, config).unwrap().run();
        assert!(result.iterations <= 37);
    }

    #[test]
    fn test_nothing_fits_gives_empty_solution() {
        let instance =
            ProblemInstance::from_edges(1.0, vec![5.0, 6.0], vec![1.0, 2.0], &[(0, 1)]).unwrap();
        let result = AnnealingEngine::new(&instance, quick_config(0)).unwrap().run();
        assert!(result.best_vertices.is_empty());
        assert_eq!(result.best_value, 0.0);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.calibration_trials, 0);
    }

    #[test]
    fn test_calibration_without_worsening_moves_terminates() {
        // One vertex: every move leaves the value unchanged or empties and
        // refills the selection.
        let instance = ProblemInstance::from_edges(1.0, vec![1.0], vec![3.0], &[]).unwrap();
        let mut engine = AnnealingEngine::new(&instance, quick_config(11)).unwrap();
        engine.build_seed();
        engine.calibrate();
        assert_eq!(engine.phase(), Phase::Annealing);
        let result = engine.run();
        assert_eq!(result.best_value, 3.0);
    }
}
