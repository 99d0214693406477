//! Annealing configuration.

use crate::error::ConfigError;

/// Offset in the calibration batch-size formula `base / (offset - p_init)`.
const CALIBRATION_BATCH_OFFSET: f64 = 1.1;

/// Parameters of one annealing run.
///
/// The defaults are the reference parameters: initial acceptance 0.9, final
/// acceptance 0.001 (1000 tries without improvement), cooling 0.995 and
/// `50 + 0.005 * |V|` trials per temperature.
///
/// # Examples
///
/// ```
/// use u_mwcs::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_seed(7)
///     .with_cooling_factor(0.99)
///     .with_final_acceptance(0.01);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_tries_without_improvement(), 100);
/// assert_eq!(config.iterations_per_temperature(2000), 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Random seed. `None` draws one; the drawn seed is reported.
    pub seed: Option<u64>,

    /// Target acceptance rate of worsening moves at the initial temperature.
    pub initial_acceptance: f64,

    /// Determines the stopping rule: the run ends after
    /// `round(1 / final_acceptance)` trials without a value change.
    pub final_acceptance: f64,

    /// Geometric cooling factor applied after each temperature step.
    pub cooling_factor: f64,

    /// Constant part of the trials-per-temperature formula.
    pub iterations_base: usize,

    /// Per-vertex part of the trials-per-temperature formula.
    pub iterations_per_vertex: f64,

    /// Probability of a grow-then-shrink move (otherwise shrink-then-grow).
    pub grow_probability: f64,

    /// Temperature multiplier between calibration batches.
    pub calibration_growth: f64,

    /// Hard budget on annealing trials. 0 = no limit.
    pub max_iterations: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_acceptance: 0.9,
            final_acceptance: 0.001,
            cooling_factor: 0.995,
            iterations_base: 50,
            iterations_per_vertex: 0.005,
            grow_probability: 0.5,
            calibration_growth: 1.1,
            max_iterations: 0,
        }
    }
}

impl AnnealConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initial_acceptance(mut self, p: f64) -> Self {
        self.initial_acceptance = p;
        self
    }

    pub fn with_final_acceptance(mut self, p: f64) -> Self {
        self.final_acceptance = p;
        self
    }

    pub fn with_cooling_factor(mut self, alpha: f64) -> Self {
        self.cooling_factor = alpha;
        self
    }

    /// Sets the trials-per-temperature formula `base + per_vertex * |V|`.
    pub fn with_iterations(mut self, base: usize, per_vertex: f64) -> Self {
        self.iterations_base = base;
        self.iterations_per_vertex = per_vertex;
        self
    }

    pub fn with_grow_probability(mut self, p: f64) -> Self {
        self.grow_probability = p;
        self
    }

    pub fn with_calibration_growth(mut self, factor: f64) -> Self {
        self.calibration_growth = factor;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let open_unit = |field: &'static str, value: f64| {
            if value > 0.0 && value < 1.0 {
                Ok(())
            } else {
                Err(out_of_range(field, "in (0, 1)", value))
            }
        };
        open_unit("initial_acceptance", self.initial_acceptance)?;
        open_unit("final_acceptance", self.final_acceptance)?;
        open_unit("cooling_factor", self.cooling_factor)?;

        if !(0.0..=1.0).contains(&self.grow_probability) {
            return Err(out_of_range(
                "grow_probability",
                "in [0, 1]",
                self.grow_probability,
            ));
        }
        if !self.iterations_per_vertex.is_finite() || self.iterations_per_vertex < 0.0 {
            return Err(out_of_range(
                "iterations_per_vertex",
                "finite and non-negative",
                self.iterations_per_vertex,
            ));
        }
        if self.iterations_base == 0 {
            return Err(out_of_range("iterations_base", "positive", 0.0));
        }
        if !self.calibration_growth.is_finite() || self.calibration_growth <= 1.0 {
            return Err(out_of_range(
                "calibration_growth",
                "finite and greater than 1",
                self.calibration_growth,
            ));
        }
        Ok(())
    }

    /// Trials per temperature step for a graph of `vertex_count` vertices.
    pub fn iterations_per_temperature(&self, vertex_count: usize) -> usize {
        let n = self.iterations_base as f64 + self.iterations_per_vertex * vertex_count as f64;
        (n.round() as usize).max(1)
    }

    /// Consecutive trials without a value change that end the run.
    pub fn max_tries_without_improvement(&self) -> usize {
        ((1.0 / self.final_acceptance).round() as usize).max(1)
    }

    /// Trials per calibration batch. Grows as `initial_acceptance`
    /// approaches 1, where the acceptance estimate needs more samples.
    pub fn calibration_batch_size(&self, vertex_count: usize) -> usize {
        let base = self.iterations_per_temperature(vertex_count) as f64;
        let size = base / (CALIBRATION_BATCH_OFFSET - self.initial_acceptance);
        (size.ceil() as usize).max(1)
    }
}

fn out_of_range(field: &'static str, requirement: &'static str, value: f64) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        requirement,
        value,
    }
}
